use sqlx::error::DatabaseError as _;
use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::favorite::{Favorite, Film};
use crate::database::models::user::User;

/// Look up a user by username. No side effects.
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Insert a new user row. A username collision surfaces as `Duplicate` even
/// though callers are expected to pre-check.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, DatabaseError> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password) VALUES (?, ?)
         RETURNING id, username, password",
    )
    .bind(username)
    .bind(password)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return DatabaseError::Duplicate("User already exists".to_string());
            }
        }
        DatabaseError::Sqlx(e)
    })
}

/// Insert a favorite holding only the title; the remaining film fields start
/// at their column defaults.
pub async fn create_favorite(
    pool: &SqlitePool,
    owner_id: i64,
    title: &str,
) -> Result<Favorite, DatabaseError> {
    let favorite = sqlx::query_as::<_, Favorite>(
        "INSERT INTO favorites (title, owner_id) VALUES (?, ?)
         RETURNING id, title, year, genre, rating, description, owner_id",
    )
    .bind(title)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(favorite)
}

/// All favorites owned by `owner_id`, in insertion order.
pub async fn list_favorites(pool: &SqlitePool, owner_id: i64) -> Result<Vec<Favorite>, DatabaseError> {
    let favorites = sqlx::query_as::<_, Favorite>(
        "SELECT id, title, year, genre, rating, description, owner_id
         FROM favorites WHERE owner_id = ? ORDER BY id",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(favorites)
}

/// Delete the first favorite matching (owner, title) if one exists, then
/// return the updated list. Deleting an absent title is a no-op.
pub async fn delete_favorite(
    pool: &SqlitePool,
    owner_id: i64,
    title: &str,
) -> Result<Vec<Favorite>, DatabaseError> {
    let mut tx = pool.begin().await?;

    let existing: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM favorites WHERE owner_id = ? AND title = ? ORDER BY id LIMIT 1",
    )
    .bind(owner_id)
    .bind(title)
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(id) = existing {
        sqlx::query("DELETE FROM favorites WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    list_favorites(pool, owner_id).await
}

/// Overwrite all film fields of the first favorite matching (owner, title),
/// including the title itself.
pub async fn update_favorite(
    pool: &SqlitePool,
    owner_id: i64,
    title: &str,
    film: &Film,
) -> Result<Favorite, DatabaseError> {
    let mut tx = pool.begin().await?;

    let existing: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM favorites WHERE owner_id = ? AND title = ? ORDER BY id LIMIT 1",
    )
    .bind(owner_id)
    .bind(title)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(id) = existing else {
        return Err(DatabaseError::NotFound("Favorite not found".to_string()));
    };

    let updated = sqlx::query_as::<_, Favorite>(
        "UPDATE favorites SET title = ?, year = ?, genre = ?, rating = ?, description = ?
         WHERE id = ?
         RETURNING id, title, year, genre, rating, description, owner_id",
    )
    .bind(&film.title)
    .bind(film.year)
    .bind(&film.genre)
    .bind(film.rating)
    .bind(&film.description)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(updated)
}
