// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pagemeta_server::{handlers, state::AppState};

/// Build the application router wired to fresh state.
pub fn create_test_app() -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/v1/summary", get(handlers::summary::get_summary))
        .with_state(AppState::new())
}

/// Spawn an ephemeral local server answering every request with the given
/// content type and body. Returns the URL of its single page.
pub async fn spawn_page(content_type: &'static str, body: &'static str) -> String {
    let app = Router::new().route(
        "/page",
        get(move || async move { ([(header::CONTENT_TYPE, content_type)], body) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/page")
}

/// Spawn an ephemeral local server answering every request with the given
/// status code and an empty body.
pub async fn spawn_status(status: StatusCode) -> String {
    let app = Router::new().route("/page", get(move || async move { status }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/page")
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
