use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::db::DbConnection;

#[instrument(skip(db))]
pub async fn handler(
    DbConnection(mut db): DbConnection<'_>,
    CurrentUser(current_user): CurrentUser,
    Path(episode_id): Path<Uuid>,
) -> impl IntoResponse {
    use pm_db::schema::episodes::dsl::*;

    tracing::info!("delete_episode");

    let deleted = diesel::delete(
        episodes.filter(id.eq(episode_id).and(user_id.eq(current_user.id))),
    )
    .execute(&mut db.connection)
    .await;

    match deleted {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Episode not found" })),
        )
            .into_response(),
        Ok(_) => Json(json!({ "message": "Episode deleted successfully" }))
            .into_response(),
        Err(e) => {
            tracing::error!("Error deleting record: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
    }
}
