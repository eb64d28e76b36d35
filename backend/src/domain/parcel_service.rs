//! Parcel query service.
//!
//! Implements the [`ParcelQuery`] driving port over the parcel store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::parcel::Parcel;
use crate::domain::ports::{ParcelPersistenceError, ParcelQuery, ParcelRepository};

pub(crate) fn map_parcel_persistence_error(error: ParcelPersistenceError) -> Error {
    match error {
        ParcelPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("parcel store unavailable: {message}"))
        }
        ParcelPersistenceError::Query { message } => {
            Error::internal(format!("parcel store error: {message}"))
        }
    }
}

/// Parcel query service backed by the parcel repository.
#[derive(Clone)]
pub struct ParcelQueryService<R> {
    parcels: Arc<R>,
}

impl<R> ParcelQueryService<R> {
    /// Create a new service from the parcel store.
    pub fn new(parcels: Arc<R>) -> Self {
        Self { parcels }
    }
}

#[async_trait]
impl<R> ParcelQuery for ParcelQueryService<R>
where
    R: ParcelRepository,
{
    async fn list_pending(&self, agent_id: i32) -> Result<Vec<Parcel>, Error> {
        self.parcels
            .list_pending_for_agent(agent_id)
            .await
            .map_err(map_parcel_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for pass-through listing and error mapping.
    use std::sync::Mutex;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::geo::GpsPoint;
    use crate::domain::parcel::ParcelStatus;
    use rstest::rstest;

    #[derive(Default)]
    struct StubParcelRepository {
        parcels: Mutex<Vec<Parcel>>,
        failure: Mutex<Option<ParcelPersistenceError>>,
    }

    impl StubParcelRepository {
        fn with_parcels(parcels: Vec<Parcel>) -> Self {
            Self {
                parcels: Mutex::new(parcels),
                failure: Mutex::new(None),
            }
        }

        fn set_failure(&self, failure: ParcelPersistenceError) {
            *self.failure.lock().expect("failure lock") = Some(failure);
        }
    }

    #[async_trait]
    impl ParcelRepository for StubParcelRepository {
        async fn list_pending_for_agent(
            &self,
            agent_id: i32,
        ) -> Result<Vec<Parcel>, ParcelPersistenceError> {
            if let Some(failure) = self.failure.lock().expect("failure lock").clone() {
                return Err(failure);
            }
            Ok(self
                .parcels
                .lock()
                .expect("parcels lock")
                .iter()
                .filter(|parcel| {
                    parcel.assigned_agent_id == agent_id
                        && parcel.status != ParcelStatus::Delivered
                })
                .cloned()
                .collect())
        }

        async fn find_by_id(
            &self,
            parcel_id: i32,
        ) -> Result<Option<Parcel>, ParcelPersistenceError> {
            Ok(self
                .parcels
                .lock()
                .expect("parcels lock")
                .iter()
                .find(|parcel| parcel.id == parcel_id)
                .cloned())
        }
    }

    fn parcel(id: i32, agent_id: i32, status: ParcelStatus) -> Parcel {
        Parcel {
            id,
            reference: format!("PX-{id:04}"),
            address: "Av. Bolívar 123".to_owned(),
            destination: GpsPoint::new(10.1, -67.0).expect("valid destination"),
            assigned_agent_id: agent_id,
            status,
        }
    }

    #[tokio::test]
    async fn lists_only_undelivered_parcels_for_the_agent() {
        let repository = StubParcelRepository::with_parcels(vec![
            parcel(1, 2, ParcelStatus::Pending),
            parcel(2, 2, ParcelStatus::EnRoute),
            parcel(3, 2, ParcelStatus::Delivered),
            parcel(4, 9, ParcelStatus::Pending),
        ]);
        let service = ParcelQueryService::new(Arc::new(repository));

        let parcels = service.list_pending(2).await.expect("query succeeds");

        let ids: Vec<i32> = parcels.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn unknown_agent_yields_empty_list() {
        let repository = StubParcelRepository::default();
        let service = ParcelQueryService::new(Arc::new(repository));

        let parcels = service.list_pending(42).await.expect("query succeeds");
        assert!(parcels.is_empty());
    }

    #[rstest]
    #[case(
        ParcelPersistenceError::connection("refused"),
        ErrorCode::ServiceUnavailable
    )]
    #[case(ParcelPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn persistence_failures_map_to_domain_errors(
        #[case] failure: ParcelPersistenceError,
        #[case] expected_code: ErrorCode,
    ) {
        let repository = StubParcelRepository::default();
        repository.set_failure(failure);
        let service = ParcelQueryService::new(Arc::new(repository));

        let err = service
            .list_pending(2)
            .await
            .expect_err("repository failures surface as domain errors");

        assert_eq!(err.code(), expected_code);
    }
}
