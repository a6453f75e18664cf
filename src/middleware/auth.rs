use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
    Extension,
};

use crate::database::{service, AppPool};
use crate::error::ApiError;

/// Authenticated user context extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// JWT authentication middleware that validates tokens, resolves the subject
/// to a user row, and injects the user context into the request.
pub async fn jwt_auth_middleware(
    Extension(AppPool(pool)): Extension<AppPool>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = crate::auth::verify_token(&token).map_err(|e| {
        tracing::debug!("rejected bearer token: {}", e);
        ApiError::unauthorized("Invalid token")
    })?;

    // The token subject must still resolve to a user row.
    let user = service::get_user_by_username(&pool, &claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid authentication credentials"))?;

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}

/// Extract the token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_bearer_tokens() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_header() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());
    }

    #[test]
    fn rejects_non_bearer_schemes() {
        let headers = headers_with("Basic dXNlcjpwdw==");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn rejects_empty_tokens() {
        let headers = headers_with("Bearer  ");
        assert!(extract_bearer_token(&headers).is_err());
    }
}
