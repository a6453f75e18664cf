use axum::{extract::Path, response::Json, Extension};

use crate::database::models::favorite::{Favorite, Film};
use crate::database::{service, AppPool};
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// POST /favorites - add a film to the current user's favorites
///
/// Only the title is taken from the payload; the other film fields start at
/// their column defaults until the entry is updated.
pub async fn create(
    Extension(AppPool(pool)): Extension<AppPool>,
    Extension(user): Extension<AuthUser>,
    Json(film): Json<Film>,
) -> Result<Json<Favorite>, ApiError> {
    let favorite = service::create_favorite(&pool, user.id, &film.title).await?;
    Ok(Json(favorite))
}

/// GET /favorites - list the current user's favorites
pub async fn list(
    Extension(AppPool(pool)): Extension<AppPool>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Favorite>>, ApiError> {
    let favorites = service::list_favorites(&pool, user.id).await?;
    Ok(Json(favorites))
}

/// DELETE /favorites/:film_title - remove a favorite, returning the remaining
/// list. Removing an absent title is a no-op.
pub async fn remove(
    Path(film_title): Path<String>,
    Extension(AppPool(pool)): Extension<AppPool>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Favorite>>, ApiError> {
    let favorites = service::delete_favorite(&pool, user.id, &film_title).await?;
    Ok(Json(favorites))
}

/// PUT /favorites/:film_title - overwrite a favorite with new film data
pub async fn update(
    Path(film_title): Path<String>,
    Extension(AppPool(pool)): Extension<AppPool>,
    Extension(user): Extension<AuthUser>,
    Json(film): Json<Film>,
) -> Result<Json<Favorite>, ApiError> {
    let favorite = service::update_favorite(&pool, user.id, &film_title, &film).await?;
    Ok(Json(favorite))
}
