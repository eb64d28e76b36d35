//! Port abstraction for recording delivery confirmations.
use async_trait::async_trait;

use crate::domain::delivery::Delivery;
use crate::domain::geo::GpsPoint;

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by delivery repository adapters.
    pub enum DeliveryPersistenceError {
        /// Repository connection could not be established.
        Connection => "delivery repository connection failed: {message}",
        /// Insert or status update failed; the transaction rolled back.
        Query => "delivery repository write failed: {message}",
        /// The parcel was already delivered when the transaction ran.
        AlreadyDelivered => "parcel {message} is already delivered",
    }
}

/// A delivery confirmation ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDelivery {
    pub parcel_id: i32,
    pub agent_id: i32,
    pub photo_url: String,
    pub gps: GpsPoint,
}

/// Transactional writer for delivery confirmations.
#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    /// Insert the delivery row and mark the parcel delivered in a single
    /// transaction. Failure rolls back both writes.
    ///
    /// The status transition must be conditional inside the transaction:
    /// when the parcel is already delivered by the time the transaction
    /// runs, implementations return [`DeliveryPersistenceError::AlreadyDelivered`]
    /// and persist nothing, even if the caller's earlier status read saw
    /// the parcel as pending.
    async fn record(&self, delivery: &NewDelivery) -> Result<Delivery, DeliveryPersistenceError>;
}
