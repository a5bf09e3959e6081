use async_trait::async_trait;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::ProvisionUserCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::errors::StoreError;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and open a session.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Internal` - Store or token failure
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;

    /// Create a `verifier` account and open a session.
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `WeakPassword` - Password breaks the strength policy
    /// * `Internal` - Store, hashing or token failure
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError>;

    /// Validate a token and return the current user record.
    ///
    /// # Errors
    /// * `SignatureInvalid` - Token is forged, altered or malformed
    /// * `Expired` - Token is past its expiry
    /// * `UserNotFound` - Token subject no longer exists
    async fn verify(&self, token: &str) -> Result<User, AuthError>;

    /// Create an account with an explicit role, bypassing the password policy.
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    async fn provision(&self, command: ProvisionUserCommand) -> Result<User, AuthError>;

    /// Number of registered users.
    async fn count_users(&self) -> Result<usize, AuthError>;
}

/// Credential store for user records.
///
/// Implementations must make `create` atomic with respect to the email
/// uniqueness check.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `DuplicateUser` - Email is already registered
    /// * `Unavailable` - Backing store failed
    async fn create(&self, user: User) -> Result<User, StoreError>;

    /// Retrieve user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Retrieve user by exact email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Whether an account with this exact email exists.
    async fn exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Number of stored users.
    async fn count(&self) -> Result<usize, StoreError>;
}
