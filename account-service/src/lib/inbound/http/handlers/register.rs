use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::AuthenticatedResponseData;
use crate::account::errors::EmailError;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterUserCommand;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

const MIN_PASSWORD_LENGTH: usize = 6;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<AuthenticatedResponseData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    name: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Password too short: minimum {min} characters")]
    PasswordTooShort { min: usize },
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;

        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ParseRegisterRequestError::EmptyName);
        }

        if self.password.len() < MIN_PASSWORD_LENGTH {
            return Err(ParseRegisterRequestError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        Ok(RegisterUserCommand::new(email, name, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
