//! Authentication utilities library
//!
//! Provides the authentication primitives used by the certificate validator:
//! - Password hashing (Argon2id) and a configurable strength policy
//! - Signed session tokens (HS256) with identity, role and expiry claims
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("abc123").unwrap();
//! assert!(hasher.verify("abc123", &hash).unwrap());
//! ```
//!
//! ## Password Policy
//! ```
//! use auth::PasswordPolicy;
//!
//! let policy = PasswordPolicy::default();
//! assert!(policy.is_satisfied_by("abc123"));
//! assert!(!policy.is_satisfied_by("abc"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("abc123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth
//!     .authenticate("abc123", &hash, "user123", "jane@x.com", "verifier")
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.role, "verifier");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::PasswordRule;
