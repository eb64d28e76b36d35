//! Delivery confirmation record.

use super::geo::GpsPoint;

/// Proof-of-delivery record created when an agent closes out a parcel.
///
/// Rows are created exclusively by the delivery recorder and never
/// mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub id: i32,
    pub parcel_id: i32,
    pub agent_id: i32,
    /// Public path the stored proof photo is served from.
    pub photo_url: String,
    pub gps: GpsPoint,
}
