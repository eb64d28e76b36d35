//! Shared handler state.

use std::sync::Arc;

use crate::domain::ports::{Authenticator, DeliveryIntake, ParcelQuery};

/// Driving ports injected into HTTP handlers.
///
/// Handlers depend only on trait objects, so tests can swap in stubs
/// and `main` can wire the Diesel-backed services without either side
/// knowing about the other.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn Authenticator>,
    pub parcels: Arc<dyn ParcelQuery>,
    pub deliveries: Arc<dyn DeliveryIntake>,
}

impl HttpState {
    pub fn new(
        auth: Arc<dyn Authenticator>,
        parcels: Arc<dyn ParcelQuery>,
        deliveries: Arc<dyn DeliveryIntake>,
    ) -> Self {
        Self {
            auth,
            parcels,
            deliveries,
        }
    }
}
