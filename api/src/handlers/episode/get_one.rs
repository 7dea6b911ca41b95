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
use pm_db::models::Episode;

use super::structs::EpisodeView;

#[instrument(skip(db))]
pub async fn handler(
    DbConnection(mut db): DbConnection<'_>,
    CurrentUser(current_user): CurrentUser,
    Path(episode_id): Path<Uuid>,
) -> impl IntoResponse {
    use pm_db::schema::episodes::dsl::*;

    tracing::info!("get_episode");

    let result = episodes
        .filter(id.eq(episode_id).and(user_id.eq(current_user.id)))
        .select(Episode::as_select())
        .first::<Episode>(&mut db.connection)
        .await;

    match result {
        Ok(result) => {
            Json(json!(EpisodeView::from(result))).into_response()
        }
        Err(diesel::result::Error::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Episode not found" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error getting record: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
    }
}
