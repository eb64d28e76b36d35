//! Behaviour coverage for the delivery recorder: guards, photo handling,
//! and rollback cleanup.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::delivery::Delivery;
use crate::domain::geo::GpsPoint;
use crate::domain::parcel::Parcel;
use crate::domain::ports::{ParcelPersistenceError, StoredPhoto};

#[derive(Default)]
struct StubParcelRepository {
    parcels: Mutex<Vec<Parcel>>,
}

impl StubParcelRepository {
    fn with_parcel(parcel: Parcel) -> Self {
        Self {
            parcels: Mutex::new(vec![parcel]),
        }
    }
}

#[async_trait]
impl ParcelRepository for StubParcelRepository {
    async fn list_pending_for_agent(
        &self,
        agent_id: i32,
    ) -> Result<Vec<Parcel>, ParcelPersistenceError> {
        Ok(self
            .parcels
            .lock()
            .expect("parcels lock")
            .iter()
            .filter(|p| p.assigned_agent_id == agent_id && p.status != ParcelStatus::Delivered)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, parcel_id: i32) -> Result<Option<Parcel>, ParcelPersistenceError> {
        Ok(self
            .parcels
            .lock()
            .expect("parcels lock")
            .iter()
            .find(|p| p.id == parcel_id)
            .cloned())
    }
}

#[derive(Default)]
struct RecordingDeliveryRepository {
    recorded: Mutex<Vec<NewDelivery>>,
    failure: Mutex<Option<DeliveryPersistenceError>>,
}

impl RecordingDeliveryRepository {
    fn set_failure(&self, failure: DeliveryPersistenceError) {
        *self.failure.lock().expect("failure lock") = Some(failure);
    }

    fn recorded(&self) -> Vec<NewDelivery> {
        self.recorded.lock().expect("recorded lock").clone()
    }
}

#[async_trait]
impl DeliveryRepository for RecordingDeliveryRepository {
    async fn record(&self, delivery: &NewDelivery) -> Result<Delivery, DeliveryPersistenceError> {
        if let Some(failure) = self.failure.lock().expect("failure lock").clone() {
            return Err(failure);
        }
        let mut recorded = self.recorded.lock().expect("recorded lock");
        recorded.push(delivery.clone());
        Ok(Delivery {
            id: recorded.len() as i32,
            parcel_id: delivery.parcel_id,
            agent_id: delivery.agent_id,
            photo_url: delivery.photo_url.clone(),
            gps: delivery.gps,
        })
    }
}

#[derive(Default)]
struct RecordingPhotoStore {
    stored: Mutex<Vec<String>>,
    removed: Mutex<Vec<String>>,
    store_calls: AtomicUsize,
    fail_store: Mutex<bool>,
    fail_remove: Mutex<bool>,
}

impl RecordingPhotoStore {
    fn fail_store(&self) {
        *self.fail_store.lock().expect("flag lock") = true;
    }

    fn fail_remove(&self) {
        *self.fail_remove.lock().expect("flag lock") = true;
    }

    fn stored(&self) -> Vec<String> {
        self.stored.lock().expect("stored lock").clone()
    }

    fn removed(&self) -> Vec<String> {
        self.removed.lock().expect("removed lock").clone()
    }

    fn store_call_count(&self) -> usize {
        self.store_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PhotoStore for RecordingPhotoStore {
    async fn store(
        &self,
        original_name: &str,
        _bytes: &[u8],
    ) -> Result<StoredPhoto, PhotoStoreError> {
        self.store_calls.fetch_add(1, Ordering::Relaxed);
        if *self.fail_store.lock().expect("flag lock") {
            return Err(PhotoStoreError::io("disk full"));
        }
        let file_name = format!("1712000000000000_{original_name}");
        self.stored
            .lock()
            .expect("stored lock")
            .push(file_name.clone());
        Ok(StoredPhoto {
            public_path: format!("/uploads/{file_name}"),
            file_name,
        })
    }

    async fn remove(&self, file_name: &str) -> Result<(), PhotoStoreError> {
        if *self.fail_remove.lock().expect("flag lock") {
            return Err(PhotoStoreError::io("permission denied"));
        }
        self.removed
            .lock()
            .expect("removed lock")
            .push(file_name.to_owned());
        Ok(())
    }
}

fn pending_parcel(id: i32, agent_id: i32) -> Parcel {
    Parcel {
        id,
        reference: format!("PX-{id:04}"),
        address: "Av. Bolívar 123".to_owned(),
        destination: GpsPoint::new(10.2, -67.1).expect("valid destination"),
        assigned_agent_id: agent_id,
        status: ParcelStatus::Pending,
    }
}

fn submission(parcel_id: i32, agent_id: i32) -> DeliverySubmission {
    DeliverySubmission {
        parcel_id,
        agent_id,
        gps: GpsPoint::new(10.1, -67.0).expect("valid fix"),
        photo_name: "door.jpg".to_owned(),
        photo_bytes: vec![0xFF, 0xD8, 0xFF],
    }
}

struct Harness {
    parcels: Arc<StubParcelRepository>,
    deliveries: Arc<RecordingDeliveryRepository>,
    photos: Arc<RecordingPhotoStore>,
    service:
        DeliveryService<StubParcelRepository, RecordingDeliveryRepository, RecordingPhotoStore>,
}

fn harness(parcels: StubParcelRepository) -> Harness {
    let parcels = Arc::new(parcels);
    let deliveries = Arc::new(RecordingDeliveryRepository::default());
    let photos = Arc::new(RecordingPhotoStore::default());
    let service = DeliveryService::new(parcels.clone(), deliveries.clone(), photos.clone());
    Harness {
        parcels,
        deliveries,
        photos,
        service,
    }
}

#[tokio::test]
async fn successful_submission_stores_photo_and_records_delivery() {
    let h = harness(StubParcelRepository::with_parcel(pending_parcel(5, 2)));

    let receipt = h
        .service
        .record_delivery(submission(5, 2))
        .await
        .expect("submission succeeds");

    assert_eq!(receipt.message, "delivery recorded");
    assert_eq!(receipt.photo_url, "/uploads/1712000000000000_door.jpg");

    let recorded = h.deliveries.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].parcel_id, 5);
    assert_eq!(recorded[0].agent_id, 2);
    assert_eq!(recorded[0].photo_url, receipt.photo_url);
    assert_eq!(h.photos.stored().len(), 1);
    assert!(h.photos.removed().is_empty());
    // Parcels still pending in the stub; the transition belongs to the
    // repository's transactional write, exercised in the adapter.
    let _ = h.parcels;
}

#[tokio::test]
async fn unknown_parcel_is_rejected_before_the_photo_is_written() {
    let h = harness(StubParcelRepository::default());

    let err = h
        .service
        .record_delivery(submission(99, 2))
        .await
        .expect_err("unknown parcel must fail");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().expect("details")["code"], "unknown_parcel");
    assert_eq!(h.photos.store_call_count(), 0);
    assert!(h.deliveries.recorded().is_empty());
}

#[tokio::test]
async fn already_delivered_parcel_is_rejected() {
    let mut parcel = pending_parcel(5, 2);
    parcel.status = ParcelStatus::Delivered;
    let h = harness(StubParcelRepository::with_parcel(parcel));

    let err = h
        .service
        .record_delivery(submission(5, 2))
        .await
        .expect_err("re-submission must fail");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().expect("details")["code"],
        "parcel_already_delivered"
    );
    assert_eq!(h.photos.store_call_count(), 0);
}

#[tokio::test]
async fn racing_submission_losing_the_transaction_is_rejected() {
    // The status read sees the parcel as pending, but a concurrent
    // submission commits first and the store's conditional transition
    // matches zero rows.
    let h = harness(StubParcelRepository::with_parcel(pending_parcel(5, 2)));
    h.deliveries
        .set_failure(DeliveryPersistenceError::already_delivered("5"));

    let err = h
        .service
        .record_delivery(submission(5, 2))
        .await
        .expect_err("losing submission must fail");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().expect("details")["code"],
        "parcel_already_delivered"
    );
    // The photo written for the losing submission is cleaned up.
    assert_eq!(h.photos.removed(), h.photos.stored());
}

#[rstest]
#[case(
    DeliveryPersistenceError::connection("refused"),
    ErrorCode::ServiceUnavailable
)]
#[case(
    DeliveryPersistenceError::query("constraint violated"),
    ErrorCode::InternalError
)]
#[tokio::test]
async fn rolled_back_write_removes_the_stored_photo(
    #[case] failure: DeliveryPersistenceError,
    #[case] expected_code: ErrorCode,
) {
    let h = harness(StubParcelRepository::with_parcel(pending_parcel(5, 2)));
    h.deliveries.set_failure(failure);

    let err = h
        .service
        .record_delivery(submission(5, 2))
        .await
        .expect_err("persistence failure surfaces");

    assert_eq!(err.code(), expected_code);
    assert_eq!(h.photos.removed(), h.photos.stored());
}

#[tokio::test]
async fn failed_cleanup_still_surfaces_the_persistence_error() {
    let h = harness(StubParcelRepository::with_parcel(pending_parcel(5, 2)));
    h.deliveries
        .set_failure(DeliveryPersistenceError::query("boom"));
    h.photos.fail_remove();

    let err = h
        .service
        .record_delivery(submission(5, 2))
        .await
        .expect_err("persistence failure surfaces");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(h.photos.removed().is_empty());
}

#[tokio::test]
async fn photo_store_failure_is_internal_and_skips_the_database() {
    let h = harness(StubParcelRepository::with_parcel(pending_parcel(5, 2)));
    h.photos.fail_store();

    let err = h
        .service
        .record_delivery(submission(5, 2))
        .await
        .expect_err("photo failure surfaces");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(h.deliveries.recorded().is_empty());
}
