//! Route registration shared by `main` and integration tests.

pub mod config;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::web;

use crate::inbound::http::deliveries::record_delivery;
use crate::inbound::http::login::login;
use crate::inbound::http::parcels::list_pending_parcels;
use crate::inbound::http::state::HttpState;

pub use config::{AppSettings, MissingTokenSecret};

/// Build a route configurator for the delivery API.
///
/// Registers the login, parcel listing, and delivery endpoints plus the
/// static `/uploads` mount serving stored proof photos.
/// Cross-origin policy for the delivery API.
///
/// The mobile client calls the API from another origin. Requests carry
/// no cookies or ambient browser credentials, so the policy stays open.
pub fn cors_policy() -> Cors {
    Cors::permissive()
}

pub fn api_routes(
    state: HttpState,
    uploads_dir: PathBuf,
) -> impl FnOnce(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state))
            .service(login)
            .service(list_pending_parcels)
            .service(record_delivery)
            .service(Files::new("/uploads", uploads_dir));
    }
}
