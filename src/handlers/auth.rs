use axum::{response::Json, Extension, Form};
use serde::{Deserialize, Serialize};

use crate::database::models::user::User;
use crate::database::{service, AppPool};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Public view of a user; the password is never echoed.
#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /register - create a new user account
pub async fn register(
    Extension(AppPool(pool)): Extension<AppPool>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<UserOut>, ApiError> {
    if service::get_user_by_username(&pool, &payload.username)
        .await?
        .is_some()
    {
        return Err(ApiError::bad_request("User already exists"));
    }

    let user = service::create_user(&pool, &payload.username, &payload.password).await?;
    Ok(Json(user.into()))
}

/// POST /login - verify form-encoded credentials and issue a bearer token
pub async fn login(
    Extension(AppPool(pool)): Extension<AppPool>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    // Passwords are stored and compared as plaintext.
    // TODO: hash credentials with bcrypt before any real deployment.
    let user = match service::get_user_by_username(&pool, &form.username).await? {
        Some(user) if user.password == form.password => user,
        _ => return Err(ApiError::bad_request("Invalid credentials")),
    };

    let token = crate::auth::issue_token(&user.username)?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}
