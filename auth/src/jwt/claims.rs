use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// Identity, role and validity window of a signed session token. Field names
/// on the wire are `userId`, `email`, `role`, `iat` and `exp`; timestamps are
/// Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Email address of the subject at issuance time
    pub email: String,

    /// Role name of the subject at issuance time
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, issued now and valid for `lifetime`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - User email
    /// * `role` - Role name
    /// * `lifetime` - Time until the token expires
    pub fn for_user(
        user_id: impl ToString,
        email: impl ToString,
        role: impl ToString,
        lifetime: Duration,
    ) -> Self {
        Self::issued_at(user_id, email, role, Utc::now().timestamp(), lifetime)
    }

    /// Create claims with an explicit issuance timestamp.
    pub fn issued_at(
        user_id: impl ToString,
        email: impl ToString,
        role: impl ToString,
        iat: i64,
        lifetime: Duration,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat,
            exp: iat + lifetime.num_seconds(),
        }
    }

    /// Check if the claims are expired at `current_timestamp`.
    ///
    /// A token is still valid in the second it expires.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user("user123", "alice@example.com", "verifier", Duration::hours(24));

        assert_eq!(claims.user_id, "user123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, "verifier");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60); // 24 hours
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::issued_at("user123", "a@b.com", "admin", 0, Duration::seconds(1000));

        assert!(!claims.is_expired(999)); // Not expired
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_wire_field_names() {
        let claims = Claims::issued_at("42", "a@b.com", "admin", 10, Duration::seconds(5));
        let json = serde_json_value(&claims);

        assert_eq!(json["userId"], "42");
        assert_eq!(json["iat"], 10);
        assert_eq!(json["exp"], 15);
    }

    fn serde_json_value(claims: &Claims) -> serde_json::Value {
        serde_json::to_value(claims).expect("Failed to serialize claims")
    }
}
