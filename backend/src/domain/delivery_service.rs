//! Delivery recording service.
//!
//! Implements the [`DeliveryIntake`] driving port: guards the parcel
//! state, persists the proof photo, and records the confirmation while
//! transitioning the parcel to delivered.
//!
//! The up-front status check is a fast path only; the repository
//! re-checks inside its transaction, so a concurrent submission that
//! loses the race gets the same already-delivered rejection.
//!
//! The photo write sits outside the database transaction. When the
//! transactional write fails the stored photo is deleted best-effort; a
//! process crash between the two effects can still leave an unreferenced
//! file behind, which is accepted.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::Error;
use crate::domain::parcel::ParcelStatus;
use crate::domain::parcel_service::map_parcel_persistence_error;
use crate::domain::ports::{
    DeliveryIntake, DeliveryPersistenceError, DeliveryReceipt, DeliveryRepository,
    DeliverySubmission, NewDelivery, ParcelRepository, PhotoStore, PhotoStoreError,
};

fn map_delivery_persistence_error(error: DeliveryPersistenceError) -> Error {
    match error {
        DeliveryPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("delivery store unavailable: {message}"))
        }
        DeliveryPersistenceError::Query { message } => {
            Error::internal(format!("delivery store error: {message}"))
        }
        DeliveryPersistenceError::AlreadyDelivered { message } => {
            Error::invalid_request(format!("parcel {message} is already delivered")).with_details(
                json!({
                    "field": "parcelId",
                    "code": "parcel_already_delivered",
                }),
            )
        }
    }
}

fn map_photo_store_error(error: PhotoStoreError) -> Error {
    let PhotoStoreError::Io { message } = error;
    Error::internal(format!("photo storage failed: {message}"))
}

/// Delivery recorder backed by the parcel store, delivery store, and
/// photo store.
#[derive(Clone)]
pub struct DeliveryService<P, D, S> {
    parcels: Arc<P>,
    deliveries: Arc<D>,
    photos: Arc<S>,
}

impl<P, D, S> DeliveryService<P, D, S> {
    /// Create a new service from its three stores.
    pub fn new(parcels: Arc<P>, deliveries: Arc<D>, photos: Arc<S>) -> Self {
        Self {
            parcels,
            deliveries,
            photos,
        }
    }
}

#[async_trait]
impl<P, D, S> DeliveryIntake for DeliveryService<P, D, S>
where
    P: ParcelRepository,
    D: DeliveryRepository,
    S: PhotoStore,
{
    async fn record_delivery(
        &self,
        submission: DeliverySubmission,
    ) -> Result<DeliveryReceipt, Error> {
        let parcel = self
            .parcels
            .find_by_id(submission.parcel_id)
            .await
            .map_err(map_parcel_persistence_error)?
            .ok_or_else(|| {
                Error::invalid_request(format!("parcel {} does not exist", submission.parcel_id))
                    .with_details(json!({
                        "field": "parcelId",
                        "code": "unknown_parcel",
                    }))
            })?;

        if parcel.status == ParcelStatus::Delivered {
            return Err(Error::invalid_request(format!(
                "parcel {} is already delivered",
                parcel.id
            ))
            .with_details(json!({
                "field": "parcelId",
                "code": "parcel_already_delivered",
            })));
        }

        let stored = self
            .photos
            .store(&submission.photo_name, &submission.photo_bytes)
            .await
            .map_err(map_photo_store_error)?;

        let new_delivery = NewDelivery {
            parcel_id: submission.parcel_id,
            agent_id: submission.agent_id,
            photo_url: stored.public_path.clone(),
            gps: submission.gps,
        };

        let delivery = match self.deliveries.record(&new_delivery).await {
            Ok(delivery) => delivery,
            Err(persistence_error) => {
                // The DB transaction rolled back but the photo already
                // landed on disk; delete it so the store does not
                // accumulate unreferenced files.
                if let Err(cleanup_error) = self.photos.remove(&stored.file_name).await {
                    warn!(
                        file_name = %stored.file_name,
                        error = %cleanup_error,
                        "failed to clean up photo after rolled-back delivery write"
                    );
                }
                return Err(map_delivery_persistence_error(persistence_error));
            }
        };

        info!(
            delivery_id = delivery.id,
            parcel_id = delivery.parcel_id,
            agent_id = delivery.agent_id,
            "delivery recorded"
        );

        Ok(DeliveryReceipt {
            message: "delivery recorded".to_owned(),
            photo_url: stored.public_path,
        })
    }
}

#[cfg(test)]
#[path = "delivery_service_tests.rs"]
mod tests;
