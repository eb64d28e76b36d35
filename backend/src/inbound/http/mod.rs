//! HTTP handlers, error envelope, and shared state.

pub mod deliveries;
pub mod error;
pub mod health;
pub mod login;
pub mod parcels;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use health::HealthState;
pub use state::HttpState;
