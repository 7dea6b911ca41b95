#[derive(Clone, Debug)]
pub struct AppState {
    pub config: pm_app::Config,

    pub redis_client: redis::Client,
}

impl AppState {
    pub fn new(config: pm_app::Config) -> Self {
        let redis_url = config.redis_url.clone();

        Self {
            config,

            redis_client: redis::Client::open(redis_url)
                .expect("failed to open redis client"),
        }
    }
}
