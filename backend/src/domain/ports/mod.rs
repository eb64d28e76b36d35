//! Domain ports.
//!
//! Driven ports (`*Repository`, `PhotoStore`) are implemented by outbound
//! adapters; driving ports (`Authenticator`, `ParcelQuery`,
//! `DeliveryIntake`) are implemented by domain services and consumed by
//! the HTTP layer.

mod macros;

pub mod authenticator;
pub mod delivery_intake;
pub mod delivery_repository;
pub mod parcel_query;
pub mod parcel_repository;
pub mod photo_store;
pub mod user_repository;

pub use authenticator::{AuthenticatedAgent, Authenticator};
pub use delivery_intake::{DeliveryIntake, DeliveryReceipt, DeliverySubmission};
pub use delivery_repository::{DeliveryPersistenceError, DeliveryRepository, NewDelivery};
pub use parcel_query::ParcelQuery;
pub use parcel_repository::{ParcelPersistenceError, ParcelRepository};
pub use photo_store::{PhotoStore, PhotoStoreError, StoredPhoto};
pub use user_repository::{UserPersistenceError, UserRepository};
