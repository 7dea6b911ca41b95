use serde::{Deserialize, Serialize};
use validator::Validate;

use pm_db::models::User;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// OAuth2 password-grant style login form: the `username` field carries the
/// email address.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub subscription_tier: String,
    pub brand_config: Option<serde_json::Value>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: user.id.to_string(),
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            is_verified: user.is_verified,
            subscription_tier: user.subscription_tier,
            brand_config: user.brand_config,
            created_at: user
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            updated_at: user
                .updated_at
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;
    use validator::Validate;

    use super::*;

    #[test]
    fn register_request_rejects_malformed_email() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "pw123".to_string(),
            full_name: None,
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn user_view_never_carries_the_password_hash() {
        let user = User {
            id: Uuid::nil(),
            email: "alice@example.com".to_string(),
            hashed_password: "$argon2id$v=19$m=19456,t=2,p=1$abc$def"
                .to_string(),
            full_name: Some("Alice".to_string()),
            is_active: true,
            is_verified: false,
            subscription_tier: "free".to_string(),
            brand_config: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap(),
            updated_at: None,
        };

        let rendered =
            serde_json::to_string(&UserView::from(user)).unwrap();

        assert!(!rendered.contains("argon2"));
        assert!(!rendered.contains("hashed_password"));
        assert!(rendered.contains("alice@example.com"));
    }
}
