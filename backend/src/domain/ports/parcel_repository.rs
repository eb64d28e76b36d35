//! Port abstraction for the parcel store.
use async_trait::async_trait;

use crate::domain::parcel::Parcel;

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by parcel repository adapters.
    pub enum ParcelPersistenceError {
        /// Repository connection could not be established.
        Connection => "parcel repository connection failed: {message}",
        /// Query failed during execution.
        Query => "parcel repository query failed: {message}",
    }
}

/// Read access to parcel records. Status mutation happens only through
/// the delivery repository's transactional write.
#[async_trait]
pub trait ParcelRepository: Send + Sync {
    /// All parcels assigned to the agent that are not yet delivered.
    /// Ordering is unspecified; an unknown agent id yields an empty list.
    async fn list_pending_for_agent(
        &self,
        agent_id: i32,
    ) -> Result<Vec<Parcel>, ParcelPersistenceError>;

    /// Fetch a parcel by id.
    async fn find_by_id(&self, parcel_id: i32) -> Result<Option<Parcel>, ParcelPersistenceError>;
}
