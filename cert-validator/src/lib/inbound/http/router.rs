use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::certificates::list_certificates;
use super::handlers::certificates::submit_certificate;
use super::handlers::certificates::verify_hash;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::pages::admin_page;
use super::handlers::pages::login_page;
use super::handlers::pages::verify_page;
use super::handlers::register::register;
use super::handlers::stats::stats;
use super::handlers::verify_session::verify_session;
use super::middleware::authenticate as auth_middleware;
use super::middleware::guard_routes;
use crate::certificate::ports::CertificateServicePort;
use crate::certificate::service::MAX_DOCUMENT_BYTES;
use crate::domain::session::RouteGuard;
use crate::domain::user::ports::AuthServicePort;

/// Session cookie settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Add the `Secure` attribute (production)
    pub cookie_secure: bool,
    /// Cookie lifetime, matching the token lifetime
    pub max_age_seconds: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub certificate_service: Arc<dyn CertificateServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub route_guard: Arc<RouteGuard>,
    pub session: SessionSettings,
}

pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/verify", get(verify_session))
        .route("/auth/logout", post(logout));

    let page_routes = Router::new()
        .route("/auth", get(login_page))
        .route("/verify", get(verify_page))
        .route("/verify/*path", get(verify_page))
        .route("/admin", get(admin_page))
        .route("/admin/*path", get(admin_page));

    let api_routes = Router::new()
        .route(
            "/api/certificates",
            post(submit_certificate).get(list_certificates),
        )
        .route("/api/certificates/verify-hash", post(verify_hash))
        .route("/api/admin/stats", get(stats))
        // One byte over the limit still reaches the handler so the size error is JSON
        .layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES + 1))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .merge(page_routes)
        .merge(api_routes)
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(state.clone(), guard_routes))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
