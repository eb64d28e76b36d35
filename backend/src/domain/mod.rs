//! Domain entities, services, and ports.
//!
//! Everything here is transport agnostic: HTTP concerns live in
//! `inbound::http`, persistence concerns in `outbound`. Services
//! implement the driving ports consumed by handlers; adapters implement
//! the driven ports consumed by services.

pub mod auth_service;
pub mod delivery;
pub mod delivery_service;
pub mod error;
pub mod geo;
pub mod parcel;
pub mod parcel_service;
pub mod password;
pub mod ports;
pub mod token;
pub mod user;

pub use self::auth_service::AuthService;
pub use self::delivery::Delivery;
pub use self::delivery_service::DeliveryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::geo::{GpsPoint, GpsValidationError};
pub use self::parcel::{Parcel, ParcelStatus, UnknownParcelStatus};
pub use self::parcel_service::ParcelQueryService;
pub use self::token::{Claims, TokenIssuer};
pub use self::user::{LoginCredentials, LoginValidationError, Role, UnknownRole, User};
