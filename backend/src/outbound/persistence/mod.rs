//! Diesel-backed persistence adapters.

pub mod diesel_delivery_repository;
pub mod diesel_parcel_repository;
pub mod diesel_user_repository;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_delivery_repository::DieselDeliveryRepository;
pub use diesel_parcel_repository::DieselParcelRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
