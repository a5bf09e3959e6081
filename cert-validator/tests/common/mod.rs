use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordPolicy;
use cert_validator::certificate::service::CertificateService;
use cert_validator::domain::session::RouteGuard;
use cert_validator::domain::session::RoutePolicy;
use cert_validator::domain::user::models::DisplayName;
use cert_validator::domain::user::models::EmailAddress;
use cert_validator::domain::user::models::ProvisionUserCommand;
use cert_validator::domain::user::models::Role;
use cert_validator::domain::user::ports::AuthServicePort;
use cert_validator::domain::user::service::AuthService;
use cert_validator::inbound::http::router::create_router;
use cert_validator::inbound::http::router::AppState;
use cert_validator::inbound::http::router::SessionSettings;
use cert_validator::outbound::ocr::FixtureDocumentProcessor;
use cert_validator::outbound::repositories::InMemoryDocumentStore;
use cert_validator::outbound::repositories::InMemoryUserRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(
            Authenticator::new(JWT_SECRET, chrono::Duration::hours(24))
                .expect("Failed to create authenticator"),
        );

        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::clone(&authenticator),
            PasswordPolicy::default(),
        ));

        auth_service
            .provision(ProvisionUserCommand {
                name: DisplayName::new("Admin User".to_string()).unwrap(),
                email: EmailAddress::new(ADMIN_EMAIL.to_string()).unwrap(),
                password: ADMIN_PASSWORD.to_string(),
                role: Role::Admin,
            })
            .await
            .expect("Failed to provision admin");

        let router = create_router(AppState {
            auth_service,
            certificate_service: Arc::new(CertificateService::new(
                Arc::new(FixtureDocumentProcessor::new()),
                Arc::new(InMemoryDocumentStore::new()),
            )),
            route_guard: Arc::new(RouteGuard::new(
                RoutePolicy::default(),
                Arc::clone(&authenticator),
            )),
            authenticator: Arc::clone(&authenticator),
            session: SessionSettings {
                cookie_secure: false,
                max_age_seconds: 86400,
            },
        });

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: client(),
            authenticator,
        }
    }

    /// Fresh client with its own cookie jar, as a second browser would have
    pub fn new_client(&self) -> reqwest::Client {
        client()
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create reqwest client")
}
