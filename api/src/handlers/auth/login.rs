use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Form, Json};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::json;
use tracing::instrument;

use crate::auth::{verify_password, AuthKeys};
use crate::db::DbConnection;
use pm_db::models::User;

use super::structs::{LoginForm, TokenResponse};

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(json!({ "detail": "Incorrect email or password" })),
    )
        .into_response()
}

#[instrument(skip_all)]
pub async fn handler(
    DbConnection(mut db): DbConnection<'_>,
    Extension(auth_keys): Extension<AuthKeys>,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    use pm_db::schema::users::dsl::*;

    tracing::info!("login_user");

    let user = match users
        .filter(email.eq(&form.username))
        .select(User::as_select())
        .first::<User>(&mut db.connection)
        .await
        .optional()
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Error looking up user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    let user = match user {
        Some(user)
            if verify_password(&form.password, &user.hashed_password) =>
        {
            user
        }
        _ => return invalid_credentials(),
    };

    let access_token = match auth_keys.create_access_token(&user.email) {
        Ok(access_token) => access_token,
        Err(e) => {
            tracing::error!("Error creating access token: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    Json(json!(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
    .into_response()
}
