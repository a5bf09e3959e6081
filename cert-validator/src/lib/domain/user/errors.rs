use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Failures raised by a credential store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for authentication operations.
///
/// `InvalidCredentials` deliberately carries no detail: an unknown email and
/// a wrong password must be indistinguishable to callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserExists(String),

    #[error("{}", .0.join("; "))]
    WeakPassword(Vec<String>),

    #[error("Invalid token")]
    SignatureInvalid,

    #[error("Token expired")]
    Expired,

    #[error("No token provided")]
    NoToken,

    #[error("Insufficient role: {0} required")]
    Unauthorized(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("User not found")]
    UserNotFound,

    // Infrastructure errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserIdError> for AuthError {
    fn from(err: UserIdError) -> Self {
        AuthError::InvalidInput(err.to_string())
    }
}

impl From<DisplayNameError> for AuthError {
    fn from(err: DisplayNameError) -> Self {
        AuthError::InvalidInput(err.to_string())
    }
}

impl From<EmailError> for AuthError {
    fn from(err: EmailError) -> Self {
        AuthError::InvalidInput(err.to_string())
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUser(email) => AuthError::UserExists(email),
            StoreError::Unavailable(reason) => AuthError::Internal(reason),
        }
    }
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::SignatureInvalid | auth::JwtError::Malformed => {
                AuthError::SignatureInvalid
            }
            auth::JwtError::TokenExpired => AuthError::Expired,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Internal(err.to_string())
    }
}
