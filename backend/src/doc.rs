//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the HTTP endpoints and wire schemas into one
//! OpenAPI document, served at `/api-docs/openapi.json` in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::parcel::ParcelStatus;
use crate::inbound::http::deliveries::DeliveryResponse;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::login::{LoginRequest, LoginResponse};
use crate::inbound::http::parcels::ParcelResponse;

/// Register the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the delivery API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Paquexpress backend API",
        description = "Agent login, pending parcel listing, and proof-of-delivery uploads."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::login::login,
        crate::inbound::http::parcels::list_pending_parcels,
        crate::inbound::http::deliveries::record_delivery,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        LoginRequest,
        LoginResponse,
        ParcelResponse,
        ParcelStatus,
        DeliveryResponse,
    )),
    tags(
        (name = "auth", description = "Credential exchange"),
        (name = "parcels", description = "Parcel assignment queries"),
        (name = "deliveries", description = "Proof-of-delivery submission"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_all_endpoints() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/login",
            "/paquetes/{agentId}",
            "/entregar",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains(&expected), "missing path {expected}");
        }
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.contains_key("ApiError"));
        assert!(schemas.contains_key("LoginResponse"));
    }
}
