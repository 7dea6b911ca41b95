use uuid::Uuid;

mod services;
mod workflow;

use services::{ContentGenerationService, TranscriptionService};

#[tokio::main]
async fn main() {
    pm_app::init_tracing();

    tracing::info!("Starting task worker");

    let config = pm_app::load_config().expect("failed to load config");

    let pool = pm_db::create_pool(&config.database_url).await;

    // service objects are constructed once and passed by reference into
    // every workflow run
    let transcription_service = TranscriptionService::new(&config);
    let content_generation_service = ContentGenerationService::new(&config);

    let mut con = redis::Client::open(config.redis_url.clone())
        .expect("Failed to open redis client")
        .get_connection()
        .expect("Failed to get redis connection");

    loop {
        let raw_id = task_worker::pop_episode(&mut con, &config.queue_name)
            .expect("Failed to get episode from queue");

        tracing::info!("Got episode: {}", raw_id);

        match raw_id.parse::<Uuid>() {
            Ok(episode_id) => {
                match workflow::process_episode(
                    &pool,
                    &transcription_service,
                    &content_generation_service,
                    episode_id,
                )
                .await
                {
                    Ok(()) => {
                        tracing::info!(
                            "Finished processing episode {}",
                            episode_id
                        );
                    }
                    Err(e) => {
                        // the failure is already recorded on the job row;
                        // the task itself just surfaces in the logs
                        tracing::error!(
                            "Failed processing episode {}: {}",
                            episode_id,
                            e
                        );
                    }
                }
            }
            Err(e) => {
                tracing::error!(
                    "Discarding malformed queue entry {:?}: {}",
                    raw_id,
                    e
                );
            }
        }

        task_worker::acknowledge_episode(&mut con, &config.queue_name, &raw_id)
            .expect("Failed to remove episode from temp queue");
    }
}
