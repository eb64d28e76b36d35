//! Driving port for recording a delivery confirmation.
use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::geo::GpsPoint;

/// A delivery submission as received from the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliverySubmission {
    pub parcel_id: i32,
    pub agent_id: i32,
    pub gps: GpsPoint,
    /// Original filename of the uploaded photo, used to derive the
    /// stored name.
    pub photo_name: String,
    pub photo_bytes: Vec<u8>,
}

/// Confirmation returned to the submitting agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message: String,
    /// Public path the stored proof photo resolves from.
    pub photo_url: String,
}

/// Accepts a delivery submission: persists the photo, records the
/// delivery, and transitions the parcel to delivered.
#[async_trait]
pub trait DeliveryIntake: Send + Sync {
    async fn record_delivery(
        &self,
        submission: DeliverySubmission,
    ) -> Result<DeliveryReceipt, Error>;
}
