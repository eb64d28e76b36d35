//! Row types mirroring the Diesel schema, plus conversions to domain
//! entities.
//!
//! Persisted enum columns are plain varchar; conversion to the domain
//! vocabulary can fail on rows written by hand or by older versions, and
//! those failures surface as [`RowConversionError`].

use std::str::FromStr;

use diesel::prelude::*;

use crate::domain::delivery::Delivery;
use crate::domain::geo::{GpsPoint, GpsValidationError};
use crate::domain::parcel::{Parcel, ParcelStatus, UnknownParcelStatus};
use crate::domain::user::{Role, UnknownRole, User};

use super::schema::{entregas, paquetes, usuarios};

/// A row failed to convert into its domain entity.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowConversionError {
    #[error(transparent)]
    Role(#[from] UnknownRole),
    #[error(transparent)]
    Status(#[from] UnknownParcelStatus),
    #[error(transparent)]
    Gps(#[from] GpsValidationError),
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = usuarios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UsuarioRow {
    pub id: i32,
    pub nombre: String,
    pub email: String,
    pub password_hash: String,
    pub rol: String,
}

impl TryFrom<UsuarioRow> for User {
    type Error = RowConversionError;

    fn try_from(row: UsuarioRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.nombre,
            email: row.email,
            password_hash: row.password_hash,
            role: Role::from_str(&row.rol)?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = paquetes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaqueteRow {
    pub id: i32,
    pub referencia: String,
    pub direccion: String,
    pub lat_destino: f64,
    pub lon_destino: f64,
    pub agente_asignado: i32,
    pub estado: String,
}

impl TryFrom<PaqueteRow> for Parcel {
    type Error = RowConversionError;

    fn try_from(row: PaqueteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            reference: row.referencia,
            address: row.direccion,
            destination: GpsPoint::new(row.lat_destino, row.lon_destino)?,
            assigned_agent_id: row.agente_asignado,
            status: ParcelStatus::from_str(&row.estado)?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = entregas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EntregaRow {
    pub id: i32,
    pub paquete_id: i32,
    pub agente_id: i32,
    pub foto_url: String,
    pub lat_gps: f64,
    pub lon_gps: f64,
}

impl TryFrom<EntregaRow> for Delivery {
    type Error = RowConversionError;

    fn try_from(row: EntregaRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            parcel_id: row.paquete_id,
            agent_id: row.agente_id,
            photo_url: row.foto_url,
            gps: GpsPoint::new(row.lat_gps, row.lon_gps)?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = entregas)]
pub struct NewEntregaRow {
    pub paquete_id: i32,
    pub agente_id: i32,
    pub foto_url: String,
    pub lat_gps: f64,
    pub lon_gps: f64,
}
