//! Parcel entity and status lifecycle.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::geo::GpsPoint;

/// Tracking status of a parcel.
///
/// Advances monotonically `pending -> en_route -> delivered`. Only the
/// final transition is driven by this system; the middle one happens
/// out-of-band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    Pending,
    EnRoute,
    Delivered,
}

impl ParcelStatus {
    /// Stable string form persisted in the `paquetes.estado` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::EnRoute => "en_route",
            Self::Delivered => "delivered",
        }
    }
}

impl std::str::FromStr for ParcelStatus {
    type Err = UnknownParcelStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "en_route" => Ok(Self::EnRoute),
            "delivered" => Ok(Self::Delivered),
            other => Err(UnknownParcelStatus(other.to_owned())),
        }
    }
}

impl std::fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a persisted status value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parcel status: {0}")]
pub struct UnknownParcelStatus(pub String);

/// A shipment tracked by reference code, destination, assignment, and status.
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    pub id: i32,
    pub reference: String,
    pub address: String,
    pub destination: GpsPoint,
    pub assigned_agent_id: i32,
    pub status: ParcelStatus,
}
