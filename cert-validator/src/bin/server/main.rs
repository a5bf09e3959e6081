use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use cert_validator::certificate::service::CertificateService;
use cert_validator::config::Config;
use cert_validator::domain::session::RouteGuard;
use cert_validator::domain::session::RoutePolicy;
use cert_validator::domain::user::models::DisplayName;
use cert_validator::domain::user::models::EmailAddress;
use cert_validator::domain::user::models::ProvisionUserCommand;
use cert_validator::domain::user::ports::AuthServicePort;
use cert_validator::domain::user::service::AuthService;
use cert_validator::inbound::http::router::create_router;
use cert_validator::inbound::http::router::AppState;
use cert_validator::inbound::http::router::SessionSettings;
use cert_validator::outbound::ocr::FixtureDocumentProcessor;
use cert_validator::outbound::repositories::InMemoryDocumentStore;
use cert_validator::outbound::repositories::InMemoryUserRepository;
use cert_validator::user::errors::AuthError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cert_validator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "cert-validator",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_lifetime_hours = config.jwt.expiration_hours,
        cookie_secure = config.session.cookie_secure,
        bootstrap_users = config.bootstrap_users.len(),
        "Configuration loaded"
    );

    let secret = config
        .jwt
        .secret
        .as_deref()
        .context("jwt.secret is not configured; set JWT__SECRET")?;
    let token_lifetime = config
        .jwt
        .token_lifetime()
        .context("Invalid token lifetime")?;
    let authenticator = Arc::new(
        Authenticator::new(secret.as_bytes(), token_lifetime)
            .context("Invalid JWT signing secret")?,
    );

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&authenticator),
        config.password_policy.to_policy(),
    ));

    for bootstrap in &config.bootstrap_users {
        let command = ProvisionUserCommand {
            name: DisplayName::new(bootstrap.name.clone())?,
            email: EmailAddress::new(bootstrap.email.clone())?,
            password: bootstrap.password.clone(),
            role: bootstrap.role,
        };

        match auth_service.provision(command).await {
            Ok(user) => tracing::info!(
                user_id = %user.id,
                email = %user.email.as_str(),
                role = %user.role,
                "Bootstrap user provisioned"
            ),
            Err(AuthError::UserExists(email)) => {
                tracing::warn!(email = %email, "Bootstrap user already exists, skipped")
            }
            Err(e) => return Err(e).context("Failed to provision bootstrap user"),
        }
    }

    let certificate_service = Arc::new(CertificateService::new(
        Arc::new(FixtureDocumentProcessor::new()),
        Arc::new(InMemoryDocumentStore::new()),
    ));

    let route_guard = Arc::new(RouteGuard::new(
        RoutePolicy::default(),
        Arc::clone(&authenticator),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(AppState {
        auth_service,
        certificate_service,
        route_guard,
        session: SessionSettings {
            cookie_secure: config.session.cookie_secure,
            max_age_seconds: authenticator.token_lifetime().num_seconds(),
        },
        authenticator,
    });

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
