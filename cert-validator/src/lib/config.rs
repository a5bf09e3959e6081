use std::env;

use auth::PasswordPolicy;
use auth::PasswordRule;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::models::Role;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub password_policy: PasswordPolicyConfig,
    #[serde(default)]
    pub bootstrap_users: Vec<BootstrapUserConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    /// Signing secret. No default: the server refuses to start without one.
    pub secret: Option<String>,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            expiration_hours: default_expiration_hours(),
        }
    }
}

impl JwtConfig {
    /// Longest accepted token lifetime: one year.
    pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

    /// Validity window of issued tokens.
    ///
    /// # Errors
    /// `expiration_hours` is not positive or exceeds `MAX_EXPIRATION_HOURS`.
    pub fn token_lifetime(&self) -> Result<Duration, ConfigError> {
        if !(1..=Self::MAX_EXPIRATION_HOURS).contains(&self.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                Self::MAX_EXPIRATION_HOURS,
                self.expiration_hours
            )));
        }

        Ok(Duration::hours(self.expiration_hours))
    }
}

fn default_expiration_hours() -> i64 {
    auth::Authenticator::DEFAULT_TOKEN_LIFETIME_HOURS
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// Mark the session cookie `Secure`
    #[serde(default)]
    pub cookie_secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PasswordPolicyConfig {
    pub min_length: usize,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_digit: bool,
    pub require_symbol: bool,
}

impl Default for PasswordPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: PasswordPolicy::DEFAULT_MIN_LENGTH,
            require_lowercase: true,
            require_uppercase: false,
            require_digit: true,
            require_symbol: false,
        }
    }
}

impl PasswordPolicyConfig {
    pub fn to_policy(&self) -> PasswordPolicy {
        let flagged = [
            (self.require_lowercase, PasswordRule::Lowercase),
            (self.require_uppercase, PasswordRule::Uppercase),
            (self.require_digit, PasswordRule::Digit),
            (self.require_symbol, PasswordRule::Symbol),
        ];

        PasswordPolicy::new(
            std::iter::once(PasswordRule::MinLength(self.min_length))
                .chain(
                    flagged
                        .into_iter()
                        .filter(|(enabled, _)| *enabled)
                        .map(|(_, rule)| rule),
                )
                .collect(),
        )
    }
}

/// Account created at startup. The only way to obtain an admin.
#[derive(Deserialize, Clone)]
pub struct BootstrapUserConfig {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl std::fmt::Debug for BootstrapUserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapUserConfig")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
