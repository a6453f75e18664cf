use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Identity record. Never exposed directly over HTTP — responses use
/// `UserOut`, which omits the password.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}
