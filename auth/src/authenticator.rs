use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and session tokens.
///
/// This is the token service of the system: it issues tokens with a fixed
/// lifetime and validates them with full signature verification.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
    /// Claims embedded in the token
    pub claims: Claims,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Default session lifetime.
    pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_lifetime` - Validity window of issued tokens
    ///
    /// # Errors
    /// * `MissingSecret` / `WeakSecret` - The secret is unusable; callers must refuse to start
    pub fn new(jwt_secret: &[u8], token_lifetime: Duration) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret)?,
            token_lifetime,
        })
    }

    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id`, `email`, `role` - Identity to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: &str,
        email: &str,
        role: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(user_id, email, role)?)
    }

    /// Issue a token for an identity without password verification.
    ///
    /// Stamps `iat = now` and `exp = now + token_lifetime`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(
        &self,
        user_id: &str,
        email: &str,
        role: &str,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = Claims::for_user(user_id, email, role, self.token_lifetime);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            claims,
        })
    }

    /// Validate and decode a token against the current time.
    ///
    /// # Errors
    /// * `SignatureInvalid` - Signature mismatch or tampered token
    /// * `TokenExpired` - Token is past its expiry
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Validate and decode a token against an explicit Unix timestamp.
    pub fn validate_token_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        self.jwt_handler.decode_at(token, now)
    }

    /// Whether a token's `exp` has passed, without verifying its signature.
    ///
    /// For display only, after the token was validated. Undecodable tokens
    /// count as expired.
    pub fn is_token_expired(&self, token: &str) -> bool {
        self.is_token_expired_at(token, Utc::now().timestamp())
    }

    pub fn is_token_expired_at(&self, token: &str, now: i64) -> bool {
        self.jwt_handler
            .decode_unverified(token)
            .map_or(true, |claims| claims.is_expired(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(SECRET, Duration::hours(24)).expect("Failed to build authenticator")
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("abc123")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("abc123", &hash, "user123", "jane@x.com", "verifier")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.user_id, "user123");
        assert_eq!(decoded.role, "verifier");
        assert_eq!(decoded, result.claims);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("abc123")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong", &hash, "user123", "jane@x.com", "verifier");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_missing_secret_fails_closed() {
        let result = Authenticator::new(b"", Duration::hours(24));
        assert!(matches!(result, Err(JwtError::MissingSecret)));
    }

    #[test]
    fn test_issue_token_lifetime() {
        let authenticator = authenticator();

        let issued = authenticator
            .issue_token("user123", "jane@x.com", "admin")
            .expect("Failed to issue token");

        assert_eq!(issued.claims.exp - issued.claims.iat, 24 * 60 * 60);
        assert!(!authenticator.is_token_expired(&issued.access_token));
        assert!(authenticator.is_token_expired_at(&issued.access_token, issued.claims.exp + 1));
    }

    #[test]
    fn test_validate_rejects_tampered_separator() {
        let authenticator = authenticator();
        let issued = authenticator
            .issue_token("user123", "jane@x.com", "verifier")
            .unwrap();

        let separator = issued.access_token.find('.').unwrap();
        let mut bytes = issued.access_token.into_bytes();
        bytes[separator] = b'x';
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(
            authenticator.validate_token(&tampered),
            Err(JwtError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_is_token_expired_garbage() {
        assert!(authenticator().is_token_expired("invalid.token.here"));
    }

    #[test]
    fn test_validate_at_boundary() {
        let authenticator = authenticator();
        let claims = Claims::issued_at("user123", "a@b.com", "verifier", 5_000, Duration::hours(24));
        let token = authenticator.jwt_handler.encode(&claims).unwrap();

        assert!(authenticator.validate_token_at(&token, claims.exp).is_ok());
        assert!(matches!(
            authenticator.validate_token_at(&token, claims.exp + 1),
            Err(JwtError::TokenExpired)
        ));
    }
}
