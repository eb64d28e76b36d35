//! PostgreSQL-backed `DeliveryRepository` implementation.
//!
//! Recording a delivery and closing its parcel happen inside one
//! transaction; a failure on either statement rolls both back. The
//! status transition is conditional on the parcel not being delivered
//! yet, so two concurrent submissions for the same parcel cannot both
//! commit: the second one's update matches zero rows and the whole
//! transaction rolls back.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::delivery::Delivery;
use crate::domain::parcel::ParcelStatus;
use crate::domain::ports::{DeliveryPersistenceError, DeliveryRepository, NewDelivery};

use super::models::{EntregaRow, NewEntregaRow};
use super::pool::{DbPool, PoolError};
use super::schema::{entregas, paquetes};

/// Diesel-backed implementation of the `DeliveryRepository` port.
#[derive(Clone)]
pub struct DieselDeliveryRepository {
    pool: DbPool,
}

impl DieselDeliveryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DeliveryPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            DeliveryPersistenceError::connection(message)
        }
    }
}

/// Error local to the recording transaction; `AlreadyDelivered` forces
/// a rollback without conflating it with a database failure.
enum RecordTxError {
    AlreadyDelivered,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for RecordTxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_diesel_error(error: diesel::result::Error) -> DeliveryPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DeliveryPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DeliveryPersistenceError::query(info.message().to_owned())
        }
        _ => DeliveryPersistenceError::query("database error"),
    }
}

#[async_trait]
impl DeliveryRepository for DieselDeliveryRepository {
    async fn record(&self, delivery: &NewDelivery) -> Result<Delivery, DeliveryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let parcel_id = delivery.parcel_id;
        let new_row = NewEntregaRow {
            paquete_id: delivery.parcel_id,
            agente_id: delivery.agent_id,
            foto_url: delivery.photo_url.clone(),
            lat_gps: delivery.gps.lat(),
            lon_gps: delivery.gps.lon(),
        };

        let row: EntregaRow = conn
            .transaction(|conn| {
                async move {
                    // Conditional transition: zero matched rows means a
                    // concurrent submission delivered the parcel after
                    // the caller's status read.
                    let closed = diesel::update(
                        paquetes::table
                            .filter(paquetes::id.eq(new_row.paquete_id))
                            .filter(paquetes::estado.ne(ParcelStatus::Delivered.as_str())),
                    )
                    .set(paquetes::estado.eq(ParcelStatus::Delivered.as_str()))
                    .execute(conn)
                    .await?;
                    if closed == 0 {
                        return Err(RecordTxError::AlreadyDelivered);
                    }

                    let row: EntregaRow = diesel::insert_into(entregas::table)
                        .values(&new_row)
                        .returning(EntregaRow::as_returning())
                        .get_result(conn)
                        .await?;

                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| match err {
                RecordTxError::AlreadyDelivered => {
                    DeliveryPersistenceError::already_delivered(parcel_id.to_string())
                }
                RecordTxError::Diesel(err) => map_diesel_error(err),
            })?;

        Delivery::try_from(row).map_err(|err| DeliveryPersistenceError::query(err.to_string()))
    }
}
