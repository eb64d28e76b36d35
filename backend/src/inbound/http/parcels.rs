//! Pending parcel listing endpoint.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::parcel::{Parcel, ParcelStatus};
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::state::HttpState;

/// Wire representation of a parcel awaiting delivery.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParcelResponse {
    pub id: i32,
    #[schema(example = "PX-0005")]
    pub reference: String,
    pub address: String,
    pub destination_lat: f64,
    pub destination_lon: f64,
    pub assigned_agent_id: i32,
    pub status: ParcelStatus,
}

impl From<Parcel> for ParcelResponse {
    fn from(parcel: Parcel) -> Self {
        Self {
            id: parcel.id,
            reference: parcel.reference,
            address: parcel.address,
            destination_lat: parcel.destination.lat(),
            destination_lon: parcel.destination.lon(),
            assigned_agent_id: parcel.assigned_agent_id,
            status: parcel.status,
        }
    }
}

/// List the undelivered parcels assigned to an agent.
///
/// Unknown agent identifiers yield an empty list rather than an error;
/// the caller cannot distinguish "no such agent" from "nothing to do".
#[utoipa::path(
    get,
    path = "/paquetes/{agentId}",
    params(("agentId" = i32, Path, description = "Identifier of the assigned agent")),
    responses(
        (status = 200, description = "Parcels awaiting delivery", body = [ParcelResponse]),
        (status = 503, description = "Datastore unreachable", body = ApiError)
    ),
    tags = ["parcels"],
    operation_id = "listPendingParcels"
)]
#[get("/paquetes/{agent_id}")]
pub async fn list_pending_parcels(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<ParcelResponse>>> {
    let agent_id = path.into_inner();
    let parcels = state.parcels.list_pending(agent_id).await?;
    Ok(web::Json(
        parcels.into_iter().map(ParcelResponse::from).collect(),
    ))
}
