//! PostgreSQL-backed `ParcelRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::parcel::{Parcel, ParcelStatus};
use crate::domain::ports::{ParcelPersistenceError, ParcelRepository};

use super::models::PaqueteRow;
use super::pool::{DbPool, PoolError};
use super::schema::paquetes;

/// Diesel-backed implementation of the `ParcelRepository` port.
#[derive(Clone)]
pub struct DieselParcelRepository {
    pool: DbPool,
}

impl DieselParcelRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ParcelPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ParcelPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ParcelPersistenceError {
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
            ParcelPersistenceError::connection("database connection error")
        }
        _ => ParcelPersistenceError::query("database error"),
    }
}

fn row_to_parcel(row: PaqueteRow) -> Result<Parcel, ParcelPersistenceError> {
    Parcel::try_from(row).map_err(|err| ParcelPersistenceError::query(err.to_string()))
}

#[async_trait]
impl ParcelRepository for DieselParcelRepository {
    async fn list_pending_for_agent(
        &self,
        agent_id: i32,
    ) -> Result<Vec<Parcel>, ParcelPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PaqueteRow> = paquetes::table
            .filter(paquetes::agente_asignado.eq(agent_id))
            .filter(paquetes::estado.ne(ParcelStatus::Delivered.as_str()))
            .order_by(paquetes::id)
            .select(PaqueteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_parcel).collect()
    }

    async fn find_by_id(&self, parcel_id: i32) -> Result<Option<Parcel>, ParcelPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PaqueteRow> = paquetes::table
            .filter(paquetes::id.eq(parcel_id))
            .select(PaqueteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_parcel).transpose()
    }
}
