use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use crate::auth::hash_password;
use crate::db::DbConnection;
use pm_db::models::User;

use super::structs::{RegisterRequest, UserView};

#[instrument(skip_all)]
pub async fn handler(
    DbConnection(mut db): DbConnection<'_>,
    Json(body): Json<RegisterRequest>,
) -> impl IntoResponse {
    use pm_db::schema::users::dsl::*;

    tracing::info!("register_user");

    if let Err(e) = body.validate() {
        return (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({ "detail": e.to_string() })),
        )
            .into_response();
    }

    // Check if user already exists
    let existing: i64 = match users
        .filter(email.eq(&body.email))
        .count()
        .get_result(&mut db.connection)
        .await
    {
        Ok(existing) => existing,
        Err(e) => {
            tracing::error!("Error checking for existing user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    if existing > 0 {
        return (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({ "detail": "Email already registered" })),
        )
            .into_response();
    }

    let password_hash = match hash_password(&body.password) {
        Ok(password_hash) => password_hash,
        Err(e) => {
            tracing::error!("Error hashing password: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    let record = match diesel::insert_into(users)
        .values((
            email.eq(&body.email),
            hashed_password.eq(password_hash),
            full_name.eq(body.full_name.clone()),
        ))
        .get_result::<User>(&mut db.connection)
        .await
    {
        Ok(record) => record,
        // the pre-check races with concurrent registrations; the unique
        // index is the authority
        Err(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            return (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({ "detail": "Email already registered" })),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Error inserting record: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    axum::Json(json!(UserView::from(record))).into_response()
}
