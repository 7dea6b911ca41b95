use axum::response::IntoResponse;
use serde_json::json;
use tracing::instrument;

use crate::auth::CurrentUser;

use super::structs::UserView;

#[instrument(skip_all)]
pub async fn handler(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    tracing::info!("read_users_me");

    axum::Json(json!(UserView::from(user))).into_response()
}
