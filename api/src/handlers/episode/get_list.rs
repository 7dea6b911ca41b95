use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::json;
use tracing::instrument;

use crate::auth::CurrentUser;
use crate::db::DbConnection;
use crate::handlers::structs::ListParams;
use pm_db::models::Episode;

use super::structs::EpisodeView;

#[instrument(skip(db))]
pub async fn handler(
    DbConnection(mut db): DbConnection<'_>,
    CurrentUser(current_user): CurrentUser,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    use pm_db::schema::episodes::dsl::*;

    tracing::info!("get_episode_list");

    let results = match episodes
        .filter(user_id.eq(current_user.id))
        .order_by(created_at.desc())
        .offset(params.skip)
        .limit(params.limit)
        .select(Episode::as_select())
        .load::<Episode>(&mut db.connection)
        .await
    {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Error getting results: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    let prepared_results = results
        .into_iter()
        .map(EpisodeView::from)
        .collect::<Vec<EpisodeView>>();

    axum::Json(json!(prepared_results)).into_response()
}
