use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthenticatedResponseData;
use crate::account::models::Credentials;
use crate::account::models::EmailAddress;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<AuthenticatedResponseData>, ApiError> {
    // A malformed email cannot belong to any account
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("User not found".to_string()))?;

    let session = state
        .auth_service
        .login(Credentials {
            email,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(StatusCode::OK, (&session).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}
