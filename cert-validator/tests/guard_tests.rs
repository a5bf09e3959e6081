mod common;

use std::sync::Arc;

use cert_validator::client::Access;
use cert_validator::client::GuardView;
use cert_validator::client::HttpSessionVerifier;
use cert_validator::client::SessionGuard;
use common::TestApp;
use common::ADMIN_EMAIL;
use common::ADMIN_PASSWORD;
use reqwest::header;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Missing Location header")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_jane_is_soft_redirected_from_admin() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({ "name": "Jane", "email": "jane@x.com", "password": "abc123" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["role"], "verifier");

    let response = app
        .post("/auth/login")
        .json(&json!({ "email": "jane@x.com", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The registration cookie is Jane's session
    let response = app
        .get("/admin")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/verify");

    let response = app
        .get("/verify")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_passes_through() {
    let app = TestApp::spawn().await;

    app.post("/auth/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    for path in ["/admin", "/admin/reports", "/verify"] {
        let response = app
            .get(path)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK, "path {}", path);
    }
}

#[tokio::test]
async fn test_login_then_landing_redirect() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/verify")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/auth");
    assert!(response.bytes().await.unwrap().is_empty());

    let response = app
        .get("/auth")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    app.post("/auth/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get("/auth")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/admin");
}

#[tokio::test]
async fn test_invalid_cookie_redirects_to_login() {
    let app = TestApp::spawn().await;

    let response = app
        .new_client()
        .get(format!("{}/admin", app.address))
        .header(header::COOKIE, "auth-token=not-a-real-token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/auth");
}

#[tokio::test]
async fn test_client_guard_against_running_server() {
    let app = TestApp::spawn().await;

    let anonymous = HttpSessionVerifier::new(app.new_client(), app.address.clone());
    let mut guard = SessionGuard::mount(Arc::new(anonymous), Access::Authenticated);
    assert_eq!(guard.settled().await, GuardView::Redirect("/auth"));

    let response = app
        .post("/auth/register")
        .json(&json!({ "name": "Jane", "email": "jane@x.com", "password": "abc123" }))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let jane = HttpSessionVerifier::new(app.new_client(), app.address.clone()).with_token(token);
    let jane = Arc::new(jane);

    let mut guard = SessionGuard::mount(Arc::clone(&jane), Access::AdminOnly);
    assert_eq!(guard.settled().await, GuardView::Redirect("/verify"));

    let mut guard = SessionGuard::mount(jane, Access::Authenticated);
    match guard.settled().await {
        GuardView::Render(user) => assert_eq!(user.email, "jane@x.com"),
        other => panic!("Expected render, got {:?}", other),
    }
}
