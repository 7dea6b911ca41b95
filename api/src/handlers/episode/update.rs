use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use types::EpisodeStatus;

use crate::auth::CurrentUser;
use crate::db::DbConnection;
use pm_db::models::Episode;

use super::structs::{EpisodeView, UpdateEpisodeChangeset, UpdateEpisodeRequest};

#[instrument(skip(db, body))]
pub async fn handler(
    DbConnection(mut db): DbConnection<'_>,
    CurrentUser(current_user): CurrentUser,
    Path(episode_id): Path<Uuid>,
    Json(body): Json<UpdateEpisodeRequest>,
) -> impl IntoResponse {
    use pm_db::schema::episodes::dsl::*;

    tracing::info!("update_episode");

    if let Some(new_status) = &body.status {
        if new_status.parse::<EpisodeStatus>().is_err() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "detail": format!("Invalid status: {}", new_status)
                })),
            )
                .into_response();
        }
    }

    let existing = match episodes
        .filter(id.eq(episode_id).and(user_id.eq(current_user.id)))
        .select(Episode::as_select())
        .first::<Episode>(&mut db.connection)
        .await
    {
        Ok(existing) => existing,
        Err(diesel::result::Error::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Episode not found" })),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Error getting record: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    let changeset = UpdateEpisodeChangeset::from(body);

    if !changeset.has_changes() {
        return Json(json!(EpisodeView::from(existing))).into_response();
    }

    let result = diesel::update(episodes.filter(id.eq(existing.id)))
        .set(&changeset)
        .get_result::<Episode>(&mut db.connection)
        .await;

    match result {
        Ok(result) => {
            Json(json!(EpisodeView::from(result))).into_response()
        }
        Err(e) => {
            tracing::error!("Error updating record: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
    }
}
