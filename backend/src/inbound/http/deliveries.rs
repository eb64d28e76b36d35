//! Proof-of-delivery submission endpoint.

use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use actix_web::{post, web};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::geo::GpsPoint;
use crate::domain::ports::DeliverySubmission;
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::state::HttpState;

const FALLBACK_PHOTO_NAME: &str = "photo";

/// Multipart payload submitted by the mobile client.
#[derive(MultipartForm)]
pub struct DeliveryForm {
    #[multipart(rename = "parcelId")]
    pub parcel_id: Text<i32>,
    #[multipart(rename = "agentId")]
    pub agent_id: Text<i32>,
    pub lat: Text<f64>,
    pub lon: Text<f64>,
    #[multipart(limit = "10MiB")]
    pub photo: Bytes,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResponse {
    #[schema(example = "delivery recorded")]
    pub message: String,
    /// Public path of the stored proof photo.
    #[schema(example = "/uploads/1712000000000000_door.jpg")]
    pub photo_reference: String,
}

fn gps_from_form(lat: f64, lon: f64) -> Result<GpsPoint, Error> {
    GpsPoint::new(lat, lon).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "code": "gps_out_of_range" }))
    })
}

/// Record a completed delivery: proof photo, GPS fix, and parcel closure.
#[utoipa::path(
    post,
    path = "/entregar",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Delivery recorded", body = DeliveryResponse),
        (status = 400, description = "Unknown parcel, repeat delivery, or bad GPS fix", body = ApiError),
        (status = 500, description = "Photo or datastore write failed", body = ApiError),
        (status = 503, description = "Datastore unreachable", body = ApiError)
    ),
    tags = ["deliveries"],
    operation_id = "recordDelivery"
)]
#[post("/entregar")]
pub async fn record_delivery(
    state: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<DeliveryForm>,
) -> ApiResult<web::Json<DeliveryResponse>> {
    let gps = gps_from_form(*form.lat, *form.lon).map_err(ApiError::from)?;
    let photo_name = form
        .photo
        .file_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_PHOTO_NAME.to_owned());
    let submission = DeliverySubmission {
        parcel_id: *form.parcel_id,
        agent_id: *form.agent_id,
        gps,
        photo_name,
        photo_bytes: form.photo.data.to_vec(),
    };
    let receipt = state.deliveries.record_delivery(submission).await?;
    Ok(web::Json(DeliveryResponse {
        message: receipt.message,
        photo_reference: receipt.photo_url,
    }))
}
