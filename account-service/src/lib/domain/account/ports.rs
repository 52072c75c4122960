use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::models::AuthSession;
use crate::account::models::Credentials;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterUserCommand;
use crate::account::models::User;
use crate::account::models::UserId;

/// Port for the account authentication flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and mint its first token pair.
    ///
    /// # Errors
    /// * `DuplicateAccount` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, AuthError>;

    /// Verify credentials and mint a token pair.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `AccountBanned` - Account is deactivated
    /// * `InvalidCredentials` - Password does not match
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, credentials: Credentials) -> Result<AuthSession, AuthError>;

    /// Exchange a refresh token for a fresh token pair.
    ///
    /// Both tokens are reissued; the presented refresh token is not tracked
    /// or revoked and stays usable until its own expiry.
    ///
    /// # Errors
    /// * `MissingToken` - Token is empty or absent
    /// * `InvalidToken` - Signature, shape, or expiry check failed
    /// * `NotFound` - Subject no longer exists in the store
    /// * `DatabaseError` - Store operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;

    /// Retrieve the account behind a validated access token.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Store operation failed
    async fn profile(&self, id: &UserId) -> Result<User, AuthError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// The store enforces email uniqueness with a hard constraint; a racing
    /// duplicate insert must surface as `DuplicateAccount`, not as a second
    /// row.
    ///
    /// # Errors
    /// * `DuplicateAccount` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Retrieve a user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;
}
