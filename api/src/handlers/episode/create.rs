use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use serde_json::json;
use tracing::instrument;

use types::{EpisodeStatus, JobStatus};

use crate::auth::CurrentUser;
use crate::db::DbConnection;
use crate::state::AppState;
use crate::storage;
use pm_db::models::Episode;
use pm_db::schema::{episodes, processing_jobs};

use super::structs::EpisodeView;

fn validation_error(detail: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "detail": detail })),
    )
        .into_response()
}

#[instrument(skip_all)]
pub async fn handler(
    State(state): State<AppState>,
    DbConnection(mut db): DbConnection<'_>,
    CurrentUser(current_user): CurrentUser,
    mut multipart: Multipart,
) -> impl IntoResponse {
    tracing::info!("create_episode");

    let mut title_value: Option<String> = None;
    let mut generate_blog_value = true;
    let mut generate_social_value = true;
    let mut generate_newsletter_value = true;
    let mut generate_show_notes_value = true;
    let mut generate_quote_graphics_value = true;
    let mut audio_file = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read multipart body: {}", e);
                return validation_error("Malformed multipart body");
            }
        };

        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "title" => match field.text().await {
                Ok(value) => title_value = Some(value),
                Err(e) => {
                    tracing::error!("Failed to read title field: {}", e);
                    return validation_error("Malformed multipart body");
                }
            },
            "generate_blog" => {
                generate_blog_value = parse_flag(field.text().await.ok());
            }
            "generate_social" => {
                generate_social_value = parse_flag(field.text().await.ok());
            }
            "generate_newsletter" => {
                generate_newsletter_value =
                    parse_flag(field.text().await.ok());
            }
            "generate_show_notes" => {
                generate_show_notes_value =
                    parse_flag(field.text().await.ok());
            }
            "generate_quote_graphics" => {
                generate_quote_graphics_value =
                    parse_flag(field.text().await.ok());
            }
            "audio_file" => {
                let original_filename =
                    field.file_name().unwrap_or("unknown").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                // the whole payload is buffered before validation
                let data = match field.bytes().await {
                    Ok(data) => data,
                    Err(e) => {
                        tracing::error!("Failed to read audio file: {}", e);
                        return validation_error(
                            "Failed to read uploaded file",
                        );
                    }
                };

                audio_file = Some((original_filename, content_type, data));
            }
            _ => {}
        }
    }

    let title_value = match title_value {
        Some(title_value) if !title_value.is_empty() => title_value,
        _ => return validation_error("Title is required"),
    };

    let (original_filename, content_type, data) = match audio_file {
        Some(audio_file) => audio_file,
        None => return validation_error("No audio file uploaded"),
    };

    if !storage::validate_file_type(&content_type) {
        return validation_error(
            "Invalid file type. Only MP3, WAV, M4A, and FLAC files are allowed.",
        );
    }

    if !storage::validate_file_size(
        data.len() as u64,
        state.config.max_file_size_mb,
    ) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "detail": format!(
                    "File size exceeds {}MB limit.",
                    state.config.max_file_size_mb
                )
            })),
        )
            .into_response();
    }

    let storage_key = storage::generate_unique_filename(&original_filename);

    let audio_path = match storage::store_audio_file(
        &state.config.upload_dir,
        &storage_key,
        &data,
    )
    .await
    {
        Ok(audio_path) => audio_path,
        Err(e) => {
            tracing::error!("Error storing audio file: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    let format_value = storage::file_format(&original_filename);
    let size_value = data.len() as i64;
    let owner_id = current_user.id;

    // the episode row and its companion job are created atomically, so a
    // worker can rely on the job existing for every queued episode
    let record = match db
        .connection
        .transaction::<Episode, diesel::result::Error, _>(|conn| {
            async move {
                let record = diesel::insert_into(episodes::table)
                    .values((
                        episodes::user_id.eq(owner_id),
                        episodes::title.eq(title_value),
                        episodes::audio_url.eq(audio_path),
                        episodes::status
                            .eq(EpisodeStatus::Uploaded.as_str()),
                        episodes::file_size.eq(size_value),
                        episodes::file_format.eq(format_value),
                        episodes::generate_blog.eq(generate_blog_value),
                        episodes::generate_social.eq(generate_social_value),
                        episodes::generate_newsletter
                            .eq(generate_newsletter_value),
                        episodes::generate_show_notes
                            .eq(generate_show_notes_value),
                        episodes::generate_quote_graphics
                            .eq(generate_quote_graphics_value),
                    ))
                    .get_result::<Episode>(conn)
                    .await?;

                diesel::insert_into(processing_jobs::table)
                    .values((
                        processing_jobs::episode_id.eq(record.id),
                        processing_jobs::job_type.eq("all"),
                        processing_jobs::status
                            .eq(JobStatus::Pending.as_str()),
                    ))
                    .execute(conn)
                    .await?;

                Ok(record)
            }
            .scope_boxed()
        })
        .await
    {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("Error inserting record: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    // hand the episode id to the background worker; the queue carries no
    // payload beyond the identifier
    let mut con = match state.redis_client.get_connection() {
        Ok(con) => con,
        Err(e) => {
            tracing::error!("Failed to get redis connection: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    if let Err(e) =
        task_worker::queue_episode(&mut con, &state.config.queue_name, record.id)
    {
        tracing::error!("Failed to enqueue episode {}: {}", record.id, e);
        return (StatusCode::INTERNAL_SERVER_ERROR).into_response();
    }

    Json(json!(EpisodeView::from(record))).into_response()
}

fn parse_flag(value: Option<String>) -> bool {
    value
        .and_then(|value| value.parse::<bool>().ok())
        .unwrap_or(true)
}
