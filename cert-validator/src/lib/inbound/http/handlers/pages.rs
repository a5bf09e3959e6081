use axum::response::Html;

// Placeholder documents for the browser routes. Access decisions happen in
// the route guard before these run.

pub async fn login_page() -> Html<&'static str> {
    Html("<!doctype html><title>Sign in</title><main id=\"login\">Sign in to Certificate Validator</main>")
}

pub async fn verify_page() -> Html<&'static str> {
    Html("<!doctype html><title>Verify</title><main id=\"verify\">Upload a certificate to verify</main>")
}

pub async fn admin_page() -> Html<&'static str> {
    Html("<!doctype html><title>Admin</title><main id=\"admin\">Administration dashboard</main>")
}
