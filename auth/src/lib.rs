//! Authentication utilities library
//!
//! Provides the credential and session-token building blocks for the
//! storefront backend:
//! - Password hashing (Argon2id)
//! - JWT access/refresh token issuance and validation
//! - An `Authenticator` coordinating both
//!
//! The account service defines its own domain traits and adapts these
//! implementations, so the library stays free of storage and transport
//! concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Token Pair Lifecycle
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::hours(1),
//!     Duration::days(14),
//! );
//!
//! // Register: hash password for storage
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify credentials and mint a token pair
//! assert!(auth.verify_password("password123", &hash).unwrap());
//! let pair = auth.issue_token_pair("user123").unwrap();
//!
//! // Later: validate either token and recover the subject
//! let claims = auth.validate_token(&pair.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
