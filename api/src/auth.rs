use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier,
    SaltString,
};
use argon2::Argon2;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{async_trait, extract::FromRequestParts, Extension, Json};
use axum::RequestPartsExt;
use chrono::{Duration, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use pm_db::models::User;
use pm_db::Pool;

/// Hash a password for storage. The plaintext never reaches the database.
pub fn hash_password(
    password: &str,
) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Verify a password against a stored PHC-format hash. An unparsable hash
/// counts as a mismatch.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    match PasswordHash::new(hashed_password) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

struct AuthKeysInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    expire_minutes: i64,
}

/// Signing and verification keys for access tokens, derived once from the
/// configured secret and shared across handlers as an extension.
#[derive(Clone)]
pub struct AuthKeys {
    inner: Arc<AuthKeysInner>,
}

impl Debug for AuthKeys {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthKeys")
            .field("algorithm", &self.inner.algorithm)
            .finish()
    }
}

impl AuthKeys {
    pub fn new(config: &pm_app::Config) -> Result<Self, String> {
        Self::with_secret(
            config.secret_key.expose_secret(),
            &config.algorithm,
            config.access_token_expire_minutes,
        )
    }

    fn with_secret(
        secret: &str,
        algorithm: &str,
        expire_minutes: i64,
    ) -> Result<Self, String> {
        let algorithm = match algorithm {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => {
                return Err(format!(
                    "unsupported signing algorithm: {}",
                    other
                ))
            }
        };

        Ok(Self {
            inner: Arc::new(AuthKeysInner {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                algorithm,
                expire_minutes,
            }),
        })
    }

    /// Issue a bearer token carrying the subject claim. Validity is purely
    /// signature + expiry.
    pub fn create_access_token(
        &self,
        subject: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expire = Utc::now() + Duration::minutes(self.inner.expire_minutes);

        let claims = Claims {
            sub: subject.to_string(),
            exp: expire.timestamp(),
        };

        encode(
            &Header::new(self.inner.algorithm),
            &claims,
            &self.inner.encoding,
        )
    }

    /// Verify a bearer token and return its subject, or `None` if the token
    /// is malformed, tampered with, or expired.
    pub fn verify_token(&self, token: &str) -> Option<String> {
        let validation = Validation::new(self.inner.algorithm);

        decode::<Claims>(token, &self.inner.decoding, &validation)
            .map(|data| data.claims.sub)
            .ok()
    }
}

fn unauthorized(detail: &'static str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(json!({ "detail": detail })),
    )
        .into_response()
}

/// Extracts the authenticated user from the bearer token, resolving the
/// token subject to a `users` row on every request.
#[derive(Debug)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Extension(auth_keys) =
            match parts.extract::<Extension<AuthKeys>>().await {
                Ok(keys) => keys,
                Err(e) => {
                    tracing::error!(
                        "Error getting auth keys from request: {}",
                        e
                    );
                    return Err(
                        (StatusCode::INTERNAL_SERVER_ERROR).into_response()
                    );
                }
            };

        let token = match parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
        {
            Some(token) => token,
            None => return Err(unauthorized("Token not provided")),
        };

        let subject = match auth_keys.verify_token(token) {
            Some(subject) => subject,
            None => {
                return Err(unauthorized("Could not validate credentials"))
            }
        };

        let pool = match parts.extract::<Extension<Pool>>().await {
            Ok(pool) => pool.0,
            Err(e) => {
                tracing::error!("Error getting pool from request: {}", e);
                return Err(
                    (StatusCode::INTERNAL_SERVER_ERROR).into_response()
                );
            }
        };

        let mut conn = match pool.get_owned().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(
                    "Error getting connection from pool: {}",
                    e
                );
                return Err(
                    (StatusCode::INTERNAL_SERVER_ERROR).into_response()
                );
            }
        };

        use pm_db::schema::users::dsl::*;

        let user = match users
            .filter(email.eq(&subject))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .await
            .optional()
        {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Error looking up token subject: {}", e);
                return Err(
                    (StatusCode::INTERNAL_SERVER_ERROR).into_response()
                );
            }
        };

        match user {
            Some(user) => Ok(Self(user)),
            None => Err(unauthorized("Could not validate credentials")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_is_not_the_plaintext() {
        let hashed = hash_password("pw123").unwrap();

        assert_ne!(hashed, "pw123");
        assert!(!hashed.contains("pw123"));
    }

    #[test]
    fn password_verification_round_trips() {
        let hashed = hash_password("pw123").unwrap();

        assert!(verify_password("pw123", &hashed));
        assert!(!verify_password("pw124", &hashed));
    }

    #[test]
    fn unparsable_hash_is_a_mismatch() {
        assert!(!verify_password("pw123", "not-a-phc-hash"));
    }

    #[test]
    fn token_round_trips_subject() {
        let keys = AuthKeys::with_secret("test-secret", "HS256", 30).unwrap();

        let token = keys.create_access_token("alice@example.com").unwrap();
        assert_eq!(
            keys.verify_token(&token),
            Some("alice@example.com".to_string())
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = AuthKeys::with_secret("test-secret", "HS256", -60).unwrap();

        let token = keys.create_access_token("alice@example.com").unwrap();
        assert_eq!(keys.verify_token(&token), None);
    }

    #[test]
    fn token_signed_with_another_key_is_rejected() {
        let keys = AuthKeys::with_secret("test-secret", "HS256", 30).unwrap();
        let other = AuthKeys::with_secret("other-secret", "HS256", 30).unwrap();

        let token = other.create_access_token("alice@example.com").unwrap();
        assert_eq!(keys.verify_token(&token), None);
    }

    #[test]
    fn unsupported_algorithm_is_rejected() {
        assert!(AuthKeys::with_secret("test-secret", "RS256", 30).is_err());
    }
}
