use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::AuthenticationResult;
use auth::Authenticator;
use auth::PasswordPolicy;
use chrono::Utc;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::ProvisionUserCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication.
///
/// Orchestrates the credential store and the token service.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    password_policy: PasswordPolicy,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `password_policy` - Rules applied to registration passwords
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        password_policy: PasswordPolicy,
    ) -> Self {
        Self {
            repository,
            authenticator,
            password_policy,
        }
    }

    async fn create_account(
        &self,
        name: DisplayName,
        email: EmailAddress,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        let password_hash = self
            .authenticator
            .hash_password(password)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            name,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        };

        Ok(self.repository.create(user).await?)
    }

    fn open_session(&self, user: User) -> Result<AuthSession, AuthError> {
        let AuthenticationResult {
            access_token,
            claims,
        } = self
            .authenticator
            .issue_token(&user.id.to_string(), user.email.as_str(), user.role.as_str())
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthSession {
            user,
            token: access_token,
            expires_at: claims.exp,
        })
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::debug!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                &user.id.to_string(),
                user.email.as_str(),
                user.role.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => {
                    AuthError::Internal(format!("Password verification failed: {}", err))
                }
                AuthenticationError::JwtError(err) => {
                    AuthError::Internal(format!("Token generation failed: {}", err))
                }
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(AuthSession {
            user,
            token: result.access_token,
            expires_at: result.claims.exp,
        })
    }

    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError> {
        if self.repository.exists(command.email.as_str()).await? {
            return Err(AuthError::UserExists(command.email.as_str().to_string()));
        }

        let violations = self.password_policy.violations(&command.password);
        if !violations.is_empty() {
            return Err(AuthError::WeakPassword(violations));
        }

        let user = self
            .create_account(command.name, command.email, &command.password, Role::Verifier)
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.open_session(user)
    }

    async fn verify(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.authenticator.validate_token(token)?;

        // Re-read the record so role and name changes apply without a new login
        let user_id = UserId::from_string(&claims.user_id).map_err(|_| AuthError::UserNotFound)?;

        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    async fn provision(&self, command: ProvisionUserCommand) -> Result<User, AuthError> {
        if self.repository.exists(command.email.as_str()).await? {
            return Err(AuthError::UserExists(command.email.as_str().to_string()));
        }

        self.create_account(command.name, command.email, &command.password, command.role)
            .await
    }

    async fn count_users(&self) -> Result<usize, AuthError> {
        Ok(self.repository.count().await?)
    }
}
