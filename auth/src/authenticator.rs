use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and token issuance.
///
/// Holds the process-wide signing configuration: the JWT secret and the
/// access/refresh lifetimes. Constructed once at startup and shared by
/// reference; nothing here mutates afterwards.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

/// A freshly minted pair of bearer tokens.
///
/// Both tokens carry the same subject. Possession is authentication: there is
/// no server-side revocation list, invalidation is purely by expiry.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Short-lived token authorizing subsequent requests
    pub access_token: String,
    /// Long-lived token used solely to mint a new pair
    pub refresh_token: String,
}

impl Authenticator {
    /// Create a new authenticator with default password hashing parameters.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `access_ttl` - Lifetime of access tokens
    /// * `refresh_ttl` - Lifetime of refresh tokens
    pub fn new(jwt_secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self::with_hasher(jwt_secret, access_ttl, refresh_ttl, PasswordHasher::new())
    }

    /// Create a new authenticator with an explicitly configured hasher.
    pub fn with_hasher(
        jwt_secret: &[u8],
        access_ttl: Duration,
        refresh_ttl: Duration,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Mint a fresh access/refresh token pair for a subject.
    ///
    /// Both tokens carry the same identifier claim; only the lifetimes differ.
    ///
    /// # Errors
    /// * `JwtError` - Token signing failed
    pub fn issue_token_pair(&self, subject: &str) -> Result<TokenPair, JwtError> {
        let access_token = self
            .jwt_handler
            .encode(&Claims::for_subject(subject, self.access_ttl))?;

        let refresh_token = self
            .jwt_handler
            .encode(&Claims::for_subject(subject, self.refresh_ttl))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Validate a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
