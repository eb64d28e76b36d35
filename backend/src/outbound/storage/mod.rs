//! Filesystem storage adapters.

pub mod fs_photo_store;

pub use fs_photo_store::FsPhotoStore;
