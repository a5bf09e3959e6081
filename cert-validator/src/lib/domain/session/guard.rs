use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use chrono::Utc;

use super::policy::ProtectionLevel;
use super::policy::RoutePolicy;
use crate::user::models::Role;

/// Outcome of evaluating one request against the route policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Per-request route protection.
///
/// Stateless: the decision depends only on the path, the session token and
/// the clock. Failure details never leave this type; callers only see where
/// to send the user.
pub struct RouteGuard {
    policy: RoutePolicy,
    authenticator: Arc<Authenticator>,
}

impl RouteGuard {
    pub fn new(policy: RoutePolicy, authenticator: Arc<Authenticator>) -> Self {
        Self {
            policy,
            authenticator,
        }
    }

    pub fn evaluate(&self, path: &str, token: Option<&str>) -> GuardDecision {
        self.evaluate_at(path, token, Utc::now().timestamp())
    }

    /// Evaluate with an explicit Unix timestamp for token expiry.
    pub fn evaluate_at(&self, path: &str, token: Option<&str>, now: i64) -> GuardDecision {
        let path = without_trailing_slash(path);

        if path == RoutePolicy::LOGIN_PATH {
            // A signed-in user is sent on to their landing page instead of the login form
            return match token.and_then(|token| self.valid_claims(token, now)) {
                Some(claims) => GuardDecision::Redirect(landing_page(&claims)),
                None => GuardDecision::Allow,
            };
        }

        let level = self.policy.resolve(path);
        if level == ProtectionLevel::Public {
            return GuardDecision::Allow;
        }

        let Some(claims) = token.and_then(|token| self.valid_claims(token, now)) else {
            return GuardDecision::Redirect(RoutePolicy::LOGIN_PATH);
        };

        if level == ProtectionLevel::AdminOnly && !is_admin(&claims) {
            tracing::debug!(path, user_id = %claims.user_id, "Non-admin redirected away from admin area");
            return GuardDecision::Redirect(RoutePolicy::VERIFY_PATH);
        }

        GuardDecision::Allow
    }

    fn valid_claims(&self, token: &str, now: i64) -> Option<Claims> {
        self.authenticator
            .validate_token_at(token, now)
            .map_err(|e| tracing::debug!(error = %e, "Session token rejected"))
            .ok()
    }
}

fn without_trailing_slash(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

fn is_admin(claims: &Claims) -> bool {
    claims
        .role
        .parse::<Role>()
        .is_ok_and(|role| role.is_admin())
}

fn landing_page(claims: &Claims) -> &'static str {
    if is_admin(claims) {
        RoutePolicy::ADMIN_PATH
    } else {
        RoutePolicy::VERIFY_PATH
    }
}
