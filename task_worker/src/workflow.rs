use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use thiserror::Error;
use uuid::Uuid;

use pm_db::models::Episode;
use pm_db::schema::{
    blog_posts, episodes, newsletters, processing_jobs, social_threads,
    transcripts,
};
use pm_db::Pool;
use types::{ContentStatus, EpisodeStatus, JobStatus, Platform};

use crate::services::{
    ContentGenerationError, ContentGenerationService, TranscriptionError,
    TranscriptionService,
};

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("episode {0} not found")]
    EpisodeNotFound(Uuid),
    #[error("failed to get database connection: {0}")]
    Pool(String),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("failed to serialize generated content: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("content generation failed: {0}")]
    ContentGeneration(#[from] ContentGenerationError),
}

/// Main workflow to process an episode: transcribe, generate content per
/// the episode's flags, finalize job and episode status.
///
/// Any failure after the episode is loaded trips the single catch-all:
/// the job is marked `failed` with the error recorded and progress reset,
/// the episode is marked `failed`, and the error is surfaced to the worker
/// loop. There is no retry and no step-level rollback, and a re-run of the
/// same episode would insert a second transcript.
pub async fn process_episode(
    pool: &Pool,
    transcription_service: &TranscriptionService,
    content_generation_service: &ContentGenerationService,
    episode_id: Uuid,
) -> Result<(), WorkflowError> {
    let mut conn = pool
        .get_owned()
        .await
        .map_err(|e| WorkflowError::Pool(e.to_string()))?;

    // A missing episode aborts here, before any job-state mutation, so the
    // companion job stays `pending`.
    // TODO: mark the job failed when the episode row is missing instead of
    // only surfacing a task error.
    let episode = episodes::table
        .filter(episodes::id.eq(episode_id))
        .select(Episode::as_select())
        .first::<Episode>(&mut conn)
        .await
        .optional()?
        .ok_or(WorkflowError::EpisodeNotFound(episode_id))?;

    match run_pipeline(
        &mut conn,
        transcription_service,
        content_generation_service,
        &episode,
    )
    .await
    {
        Ok(()) => Ok(()),
        Err(e) => {
            if let Err(update_err) =
                mark_failed(&mut conn, episode.id, &e.to_string()).await
            {
                tracing::error!(
                    "Failed to record failure for episode {}: {}",
                    episode.id,
                    update_err
                );
            }

            Err(e)
        }
    }
}

async fn run_pipeline(
    conn: &mut AsyncPgConnection,
    transcription_service: &TranscriptionService,
    content_generation_service: &ContentGenerationService,
    episode: &Episode,
) -> Result<(), WorkflowError> {
    begin_job(conn, episode.id).await?;
    set_episode_status(conn, episode.id, EpisodeStatus::Processing).await?;

    // Step 1: Transcribe the audio
    tracing::info!("Starting transcription for episode {}", episode.id);

    let transcription = transcription_service
        .transcribe_audio(&episode.audio_url)
        .await?;

    diesel::insert_into(transcripts::table)
        .values((
            transcripts::episode_id.eq(episode.id),
            transcripts::text.eq(&transcription.text),
            transcripts::segments
                .eq(serde_json::to_value(&transcription.segments)?),
            transcripts::speakers
                .eq(serde_json::to_value(&transcription.speakers)?),
            transcripts::word_count.eq(transcription.word_count),
        ))
        .execute(conn)
        .await?;

    checkpoint_job(conn, episode.id, 40).await?;

    // Step 2: Generate content based on the episode's flags
    tracing::info!("Starting content generation for episode {}", episode.id);

    if episode.generate_blog {
        tracing::info!("Generating blog post for episode {}", episode.id);

        let draft = content_generation_service
            .generate_blog_post(episode, &transcription.text)
            .await?;

        diesel::insert_into(blog_posts::table)
            .values((
                blog_posts::episode_id.eq(episode.id),
                blog_posts::title.eq(&draft.title),
                blog_posts::content.eq(&draft.content),
                blog_posts::excerpt.eq(&draft.excerpt),
                blog_posts::word_count.eq(draft.word_count),
                blog_posts::seo_title.eq(&draft.seo_title),
                blog_posts::seo_description.eq(&draft.seo_description),
                blog_posts::seo_keywords.eq(&draft.seo_keywords),
                blog_posts::status.eq(ContentStatus::Draft.as_str()),
            ))
            .execute(conn)
            .await?;
    }

    checkpoint_job(conn, episode.id, 60).await?;

    if episode.generate_social {
        tracing::info!(
            "Generating social media content for episode {}",
            episode.id
        );

        let content = content_generation_service
            .generate_social_media_content(episode, &transcription.text)
            .await?;

        for (platform, thread_value) in [
            (
                Platform::Twitter,
                serde_json::to_value(&content.twitter_thread)?,
            ),
            (
                Platform::Linkedin,
                serde_json::to_value(&content.linkedin_post)?,
            ),
            (
                Platform::Instagram,
                serde_json::to_value(&content.instagram_caption)?,
            ),
        ] {
            diesel::insert_into(social_threads::table)
                .values((
                    social_threads::episode_id.eq(episode.id),
                    social_threads::platform.eq(platform.as_str()),
                    social_threads::thread.eq(thread_value),
                    social_threads::status.eq(ContentStatus::Draft.as_str()),
                ))
                .execute(conn)
                .await?;
        }
    }

    checkpoint_job(conn, episode.id, 80).await?;

    if episode.generate_newsletter {
        tracing::info!("Generating newsletter for episode {}", episode.id);

        let draft = content_generation_service
            .generate_newsletter_content(episode, &transcription.text)
            .await?;

        diesel::insert_into(newsletters::table)
            .values((
                newsletters::episode_id.eq(episode.id),
                newsletters::subject.eq(&draft.subject),
                newsletters::html_content.eq(&draft.html_content),
                newsletters::plain_text.eq(&draft.plain_text),
                newsletters::status.eq(ContentStatus::Draft.as_str()),
            ))
            .execute(conn)
            .await?;
    }

    if episode.generate_show_notes {
        tracing::info!("Generating show notes for episode {}", episode.id);

        let notes = content_generation_service
            .generate_show_notes(episode, &transcription.text)
            .await?;

        // show notes have no table of their own; they only surface in logs
        tracing::info!(
            "Show notes for episode {}: {}",
            episode.id,
            serde_json::to_value(&notes)?
        );
    }

    complete_job(conn, episode.id).await?;

    diesel::update(episodes::table.filter(episodes::id.eq(episode.id)))
        .set((
            episodes::status.eq(EpisodeStatus::Completed.as_str()),
            episodes::processed_at.eq(Utc::now()),
        ))
        .execute(conn)
        .await?;

    Ok(())
}

/// First checkpoint: the job leaves `pending` and gets its start stamp.
async fn begin_job(
    conn: &mut AsyncPgConnection,
    episode_id: Uuid,
) -> QueryResult<()> {
    diesel::update(
        processing_jobs::table
            .filter(processing_jobs::episode_id.eq(episode_id)),
    )
    .set((
        processing_jobs::status.eq(JobStatus::Processing.as_str()),
        processing_jobs::progress.eq(10),
        processing_jobs::started_at.eq(Utc::now()),
    ))
    .execute(conn)
    .await?;

    Ok(())
}

/// Persist an intermediate progress checkpoint.
async fn checkpoint_job(
    conn: &mut AsyncPgConnection,
    episode_id: Uuid,
    progress: i32,
) -> QueryResult<()> {
    diesel::update(
        processing_jobs::table
            .filter(processing_jobs::episode_id.eq(episode_id)),
    )
    .set((
        processing_jobs::status.eq(JobStatus::Processing.as_str()),
        processing_jobs::progress.eq(progress),
    ))
    .execute(conn)
    .await?;

    Ok(())
}

async fn complete_job(
    conn: &mut AsyncPgConnection,
    episode_id: Uuid,
) -> QueryResult<()> {
    diesel::update(
        processing_jobs::table
            .filter(processing_jobs::episode_id.eq(episode_id)),
    )
    .set((
        processing_jobs::status.eq(JobStatus::Completed.as_str()),
        processing_jobs::progress.eq(100),
        processing_jobs::completed_at.eq(Utc::now()),
    ))
    .execute(conn)
    .await?;

    Ok(())
}

/// Record a workflow failure on the job and the episode. Progress resets
/// to 0 and the error detail lands in the job's error log.
async fn mark_failed(
    conn: &mut AsyncPgConnection,
    episode_id: Uuid,
    detail: &str,
) -> QueryResult<()> {
    diesel::update(
        processing_jobs::table
            .filter(processing_jobs::episode_id.eq(episode_id)),
    )
    .set((
        processing_jobs::status.eq(JobStatus::Failed.as_str()),
        processing_jobs::progress.eq(0),
        processing_jobs::error_log.eq(detail),
        processing_jobs::completed_at.eq(Utc::now()),
    ))
    .execute(conn)
    .await?;

    set_episode_status(conn, episode_id, EpisodeStatus::Failed).await?;

    Ok(())
}

async fn set_episode_status(
    conn: &mut AsyncPgConnection,
    episode_id: Uuid,
    status: EpisodeStatus,
) -> QueryResult<()> {
    diesel::update(episodes::table.filter(episodes::id.eq(episode_id)))
        .set(episodes::status.eq(status.as_str()))
        .execute(conn)
        .await?;

    Ok(())
}
