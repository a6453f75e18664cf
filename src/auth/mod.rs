use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

/// Claims carried by a bearer token. `sub` is the username; tokens carry no
/// expiry claim.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
}

impl Claims {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            sub: subject.into(),
            iat: Utc::now().timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("JWT secret is not configured")]
    MissingSecret,
}

/// Sign a token for the given username.
pub fn issue_token(subject: &str) -> Result<String, JwtError> {
    let secret = secret()?;
    let claims = Claims::new(subject);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Validate a token's signature and return the embedded claims.
pub fn verify_token(token: &str) -> Result<Claims, JwtError> {
    let secret = secret()?;

    // Tokens are issued without an exp claim, so expiry validation is off.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| JwtError::InvalidToken(e.to_string()))
}

fn secret() -> Result<&'static str, JwtError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_round_trip_their_subject() {
        let token = issue_token("alice").unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let mut token = issue_token("alice").unwrap();
        // Flip the signature
        token.pop();
        token.push('x');
        assert!(matches!(verify_token(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(matches!(
            verify_token("not-a-jwt"),
            Err(JwtError::InvalidToken(_))
        ));
    }
}
