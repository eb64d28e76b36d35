//! Agent login endpoint.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::user::{LoginCredentials, LoginValidationError};
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana@paquexpress.test")]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Signed bearer token for the authenticated agent.
    pub token: String,
    pub agent_id: i32,
}

fn map_validation_error(err: LoginValidationError) -> Error {
    let code = match err {
        LoginValidationError::EmptyEmail => "empty_email",
        LoginValidationError::EmptyPassword => "empty_password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "code": code }))
}

/// Exchange agent credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, description = "Malformed credentials", body = ApiError),
        (status = 401, description = "Unknown email or wrong password", body = ApiError),
        (status = 503, description = "Datastore unreachable", body = ApiError)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let request = body.into_inner();
    let credentials = LoginCredentials::try_from_parts(&request.email, &request.password)
        .map_err(|err| ApiError::from(map_validation_error(err)))?;
    let agent = state.auth.authenticate(&credentials).await?;
    Ok(web::Json(LoginResponse {
        token: agent.token,
        agent_id: agent.agent_id,
    }))
}
