use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use filmlist_api::config::DatabaseConfig;
use filmlist_api::database::manager::DatabaseManager;

/// Build the full application router on a fresh in-memory database.
pub async fn test_app() -> Router {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = DatabaseManager::connect(&config)
        .await
        .expect("in-memory pool");
    DatabaseManager::migrate(&pool).await.expect("schema migration");
    filmlist_api::app(pool)
}

/// Drive one request through the router and decode the JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn json_request(method: &str, path: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn bare_request(method: &str, path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn register(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    let payload = serde_json::json!({ "username": username, "password": password });
    send(app, json_request("POST", "/register", None, &payload)).await
}

pub async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    let form = format!("username={username}&password={password}");
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();
    send(app, request).await
}

/// Register + login, returning a usable bearer token.
pub async fn login_token(app: &Router, username: &str, password: &str) -> String {
    let (status, _) = register(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "registration failed");
    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "login failed");
    body["access_token"]
        .as_str()
        .expect("access_token in login response")
        .to_string()
}
