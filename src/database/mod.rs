pub mod manager;
pub mod models;
pub mod service;

use sqlx::SqlitePool;

/// Application database pool, injected into each request as an extension and
/// handed explicitly to persistence calls.
#[derive(Clone)]
pub struct AppPool(pub SqlitePool);
