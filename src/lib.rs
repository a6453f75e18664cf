//! filmlist-api — an authenticated REST service managing each user's list of
//! favorite films.
//!
//! Registration and login are public; the favorites CRUD routes require a
//! bearer token issued by the login endpoint. The main binary lives in
//! `src/main.rs`.

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::http::{HeaderValue, StatusCode};
use axum::response::Json;
use axum::routing::get;
use axum::{Extension, Router};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::database::AppPool;

/// Build the application router around an already-migrated database pool.
pub fn app(pool: SqlitePool) -> Router {
    use axum::routing::post;

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        // Protected favorites API
        .merge(favorites_routes())
        // Global middleware
        .layer(Extension(AppPool(pool)))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn favorites_routes() -> Router {
    use axum::routing::delete;
    use handlers::favorites;

    Router::new()
        .route("/favorites", get(favorites::list).post(favorites::create))
        .route(
            "/favorites/:film_title",
            delete(favorites::remove).put(favorites::update),
        )
        .layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

/// Single configured origin, mirrored methods and headers, credentials
/// allowed.
fn cors_layer() -> CorsLayer {
    let origin = &config::config().security.cors_origin;

    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!("invalid CORS origin {origin:?}; cross-origin requests will be rejected");
            layer
        }
    }
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "filmlist-api",
        "version": version,
        "endpoints": {
            "register": "POST /register (public)",
            "login": "POST /login (public, form-encoded credentials)",
            "favorites": "GET|POST /favorites, PUT|DELETE /favorites/:film_title (bearer token)",
        }
    }))
}

async fn health(Extension(AppPool(pool)): Extension<AppPool>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::manager::DatabaseManager::health_check(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
