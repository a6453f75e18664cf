use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A film entry owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub id: i64,
    pub title: String,
    pub year: i64,
    pub genre: String,
    pub rating: i64,
    pub description: String,
    pub owner_id: i64,
}

/// Film fields accepted by the create and update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub year: i64,
    pub genre: String,
    pub rating: i64,
    pub description: String,
}
