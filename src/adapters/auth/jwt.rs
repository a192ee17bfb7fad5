//! JWT implementation of the TokenValidator port.
//!
//! Validates HS256 tokens signed with a shared secret. The host system
//! issues the tokens; the claims carry the user id, the superuser flag, and
//! the granted permission codenames.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::TokenValidator;

/// Token claims issued by the host system.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    /// User id.
    pub sub: String,
    /// Superuser flag.
    #[serde(default)]
    pub superuser: bool,
    /// Granted permission codenames.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Expiry, seconds since epoch.
    pub exp: usize,
}

/// HS256 token validator.
pub struct JwtTokenValidator {
    secret: Secret<String>,
}

impl JwtTokenValidator {
    pub fn new(secret: Secret<String>) -> Self {
        Self { secret }
    }
}

#[async_trait]
impl TokenValidator for JwtTokenValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let data = decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256)).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            },
        )?;

        let id = UserId::new(data.claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(
            id,
            data.claims.superuser,
            data.claims.permissions,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CURATE_ACCESS;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn secret() -> Secret<String> {
        Secret::new("test-secret".to_string())
    }

    fn token(claims: &Claims, key: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[tokio::test]
    async fn valid_token_round_trips_claims() {
        let validator = JwtTokenValidator::new(secret());
        let raw = token(
            &Claims {
                sub: "42".to_string(),
                superuser: true,
                permissions: vec![CURATE_ACCESS.to_string()],
                exp: future_exp(),
            },
            "test-secret",
        );

        let user = validator.validate(&raw).await.unwrap();
        assert_eq!(user.id.as_str(), "42");
        assert!(user.is_superuser);
        assert!(user.has_permission(CURATE_ACCESS));
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid() {
        let validator = JwtTokenValidator::new(secret());
        let raw = token(
            &Claims {
                sub: "42".to_string(),
                superuser: false,
                permissions: vec![],
                exp: future_exp(),
            },
            "other-secret",
        );

        let result = validator.validate(&raw).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let validator = JwtTokenValidator::new(secret());
        let raw = token(
            &Claims {
                sub: "42".to_string(),
                superuser: false,
                permissions: vec![],
                exp: 1_000,
            },
            "test-secret",
        );

        let result = validator.validate(&raw).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn empty_subject_is_invalid() {
        let validator = JwtTokenValidator::new(secret());
        let raw = token(
            &Claims {
                sub: "".to_string(),
                superuser: false,
                permissions: vec![],
                exp: future_exp(),
            },
            "test-secret",
        );

        let result = validator.validate(&raw).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
