use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthenticatedResponseData;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequestBody>,
) -> Result<ApiSuccess<AuthenticatedResponseData>, ApiError> {
    let session = state
        .auth_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(StatusCode::OK, (&session).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequestBody {
    /// Absent field deserializes to empty, which the service rejects
    /// as a missing token rather than a malformed body.
    #[serde(default)]
    refresh_token: String,
}
