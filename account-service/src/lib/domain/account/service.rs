use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenPair;
use chrono::Utc;

use crate::account::errors::AuthError;
use crate::account::models::AuthSession;
use crate::account::models::Credentials;
use crate::account::models::RegisterUserCommand;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::ports::AuthServicePort;
use crate::account::ports::UserRepository;

/// Domain service implementing the register, login, and refresh flows.
///
/// Stateless across calls: the only persistent state is the user record
/// behind the repository, and the only shared state is the read-only signing
/// configuration inside the authenticator.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Shared credential and token configuration
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn issue_tokens(&self, id: &UserId) -> Result<TokenPair, AuthError> {
        self.authenticator
            .issue_token_pair(&id.to_string())
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, AuthError> {
        // Advisory pre-check; the store's unique index is the real guard
        // against a racing duplicate registration.
        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(AuthError::DuplicateAccount);
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            name: command.name,
            password_hash,
            is_active: true,
            is_admin: false,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        let tokens = self.issue_tokens(&created_user.id)?;

        tracing::info!(user_id = %created_user.id, "Account registered");

        Ok(AuthSession {
            user: created_user,
            tokens,
        })
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthSession, AuthError> {
        let user = self
            .repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AuthError::NotFound)?;

        if !user.is_active {
            return Err(AuthError::AccountBanned);
        }

        let is_valid = self
            .authenticator
            .verify_password(&credentials.password, &user.password_hash)?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.issue_tokens(&user.id)?;

        Ok(AuthSession { user, tokens })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }

        // Expired and tampered tokens are rejected identically.
        let claims = self.authenticator.validate_token(refresh_token).map_err(|e| {
            tracing::warn!("Refresh token rejected: {}", e);
            AuthError::InvalidToken
        })?;

        let user_id = UserId::from_string(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        let tokens = self.issue_tokens(&user.id)?;

        Ok(AuthSession { user, tokens })
    }

    async fn profile(&self, id: &UserId) -> Result<User, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use auth::Claims;
    use auth::JwtHandler;
    use chrono::Duration;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::account::models::EmailAddress;

    const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, AuthError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            TEST_SECRET,
            Duration::hours(1),
            Duration::days(14),
        ))
    }

    fn stored_user(email: &str, password: &str, is_active: bool) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            name: "Test User".to_string(),
            password_hash: authenticator().hash_password(password).unwrap(),
            is_active,
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "a@x.com"
                    && user.name == "A"
                    && user.password_hash.starts_with("$argon2")
                    && user.is_active
                    && !user.is_admin
            })
            .times(1)
            .returning(|user| Ok(user));

        let auth = authenticator();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&auth));

        let command = RegisterUserCommand::new(
            EmailAddress::new("a@x.com".to_string()).unwrap(),
            "A".to_string(),
            "secret123".to_string(),
        );

        let session = service.register(command).await.expect("Registration failed");

        assert_eq!(session.user.email.as_str(), "a@x.com");
        assert!(!session.tokens.access_token.is_empty());
        assert!(!session.tokens.refresh_token.is_empty());

        // The embedded identifier decodes to the newly created user's id
        let claims = auth.validate_token(&session.tokens.access_token).unwrap();
        assert_eq!(claims.sub, session.user.id.to_string());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        let existing = stored_user("a@x.com", "secret123", true);
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        // No write is attempted once the duplicate is detected
        repository.expect_create().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let command = RegisterUserCommand::new(
            EmailAddress::new("a@x.com".to_string()).unwrap(),
            "A".to_string(),
            "secret123".to_string(),
        );

        let result = service.register(command).await;
        assert!(matches!(result, Err(AuthError::DuplicateAccount)));
    }

    #[tokio::test]
    async fn test_register_racing_duplicate_surfaces_from_store() {
        let mut repository = MockTestUserRepository::new();

        // Pre-check passes, but the store's unique index rejects the insert
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(AuthError::DuplicateAccount));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let command = RegisterUserCommand::new(
            EmailAddress::new("a@x.com".to_string()).unwrap(),
            "A".to_string(),
            "secret123".to_string(),
        );

        let result = service.register(command).await;
        assert!(matches!(result, Err(AuthError::DuplicateAccount)));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("a@x.com", "secret123", true);
        let user_id = user.id;
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&auth));

        let session = service
            .login(Credentials {
                email: EmailAddress::new("a@x.com".to_string()).unwrap(),
                password: "secret123".to_string(),
            })
            .await
            .expect("Login failed");

        let claims = auth.validate_token(&session.tokens.refresh_token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("a@x.com", "secret123", true);
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .login(Credentials {
                email: EmailAddress::new("a@x.com".to_string()).unwrap(),
                password: "wrong_password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .login(Credentials {
                email: EmailAddress::new("nobody@x.com".to_string()).unwrap(),
                password: "secret123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn test_login_banned_account_regardless_of_password() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("a@x.com", "secret123", false);
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator());

        // Correct password, still rejected
        let result = service
            .login(Credentials {
                email: EmailAddress::new("a@x.com".to_string()).unwrap(),
                password: "secret123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::AccountBanned)));
    }

    #[tokio::test]
    async fn test_refresh_success_reissues_both_tokens() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("a@x.com", "secret123", true);
        let user_id = user.id;
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&auth));

        let pair = auth.issue_token_pair(&user_id.to_string()).unwrap();
        let session = service
            .refresh(&pair.refresh_token)
            .await
            .expect("Refresh failed");

        assert!(!session.tokens.access_token.is_empty());
        assert!(!session.tokens.refresh_token.is_empty());
        let claims = auth.validate_token(&session.tokens.access_token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[tokio::test]
    async fn test_refresh_empty_token() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.refresh("").await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn test_refresh_expired_token() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), authenticator());

        // Mint a token that expired well past the validation leeway
        let handler = JwtHandler::new(TEST_SECRET);
        let expired = handler
            .encode(&Claims::for_subject(
                UserId::new().to_string(),
                Duration::seconds(-120),
            ))
            .unwrap();

        let result = service.refresh(&expired).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_refresh_corrupted_token() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.refresh("not.a.token").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_refresh_non_uuid_subject() {
        let repository = MockTestUserRepository::new();
        let auth = authenticator();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&auth));

        // Well-signed token whose subject is not a user id
        let pair = auth.issue_token_pair("not-a-uuid").unwrap();
        let result = service.refresh(&pair.refresh_token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_profile_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.profile(&UserId::new()).await;
        assert!(matches!(result, Err(AuthError::NotFound)));
    }
}
