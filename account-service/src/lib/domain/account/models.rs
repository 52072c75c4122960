use std::fmt;
use std::str::FromStr;

use auth::TokenPair;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::EmailError;
use crate::account::errors::UserIdError;

/// User aggregate entity.
///
/// Owned by the account store; the auth flows read and create it but never
/// hold an independent copy. The password hash never leaves the domain layer.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: String,
    pub password_hash: String,
    /// False blocks login entirely
    pub is_active: bool,
    /// Carried in responses, never enforced here
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// The login key. Validates format using an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub name: String,
    pub password: String,
}

impl RegisterUserCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `name` - Display name
    /// * `password` - Plain text password (hashed by the service)
    pub fn new(email: EmailAddress, name: String, password: String) -> Self {
        Self {
            email,
            name,
            password,
        }
    }
}

/// Login credentials with a validated email
#[derive(Debug)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: String,
}

/// Result of a successful register, login, or refresh.
///
/// Transient: built fresh on every call, never persisted. The token pair is
/// stateless; nothing here is stored server-side.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_round_trip() {
        let id = UserId::new();
        let parsed = UserId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_id_invalid_format() {
        let result = UserId::from_string("not-a-uuid");
        assert!(matches!(result, Err(UserIdError::InvalidFormat(_))));
    }

    #[test]
    fn test_email_address_valid() {
        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "a@x.com");
    }

    #[test]
    fn test_email_address_invalid() {
        let result = EmailAddress::new("not-an-email".to_string());
        assert!(matches!(result, Err(EmailError::InvalidFormat(_))));
    }
}
