//! Driving port for listing an agent's pending parcels.
use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::parcel::Parcel;

/// Returns undelivered parcels assigned to a given agent.
///
/// No authorization check ties the caller's token to the requested agent
/// id; any caller can query any agent's parcels.
#[async_trait]
pub trait ParcelQuery: Send + Sync {
    async fn list_pending(&self, agent_id: i32) -> Result<Vec<Parcel>, Error>;
}
