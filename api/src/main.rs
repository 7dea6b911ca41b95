use axum::extract::DefaultBodyLimit;
use axum::http::header::{HeaderName, AUTHORIZATION};
use axum::http::HeaderValue;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Extension;
use axum::{routing::get, Router};
use serde_json::json;
use std::iter::once;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;
use tower_http::{
    compression::CompressionLayer, propagate_header::PropagateHeaderLayer,
};
use tracing::instrument;

mod auth;
mod db;
mod handlers;
mod state;
mod storage;

#[tokio::main]
async fn main() -> Result<(), axum::BoxError> {
    pm_app::init_tracing();

    let config = pm_app::load_config().expect("failed to load config");

    let auth_keys =
        auth::AuthKeys::new(&config).expect("failed to build auth keys");
    let pool = pm_db::create_pool(&config.database_url).await;

    let state = state::AppState::new(config.clone());

    // uploads are fully buffered before validation, so the body limit has
    // to admit the configured ceiling plus the other form fields
    let upload_body_limit =
        usize::try_from((config.max_file_size_mb + 1) * 1024 * 1024)
            .expect("upload size limit does not fit in usize");

    run(state, &config, |app| {
        app.route("/", get(root))
            .nest("/api/v1/auth", {
                Router::new()
                    .route("/register", post(handlers::auth::register::handler))
                    .route("/login", post(handlers::auth::login::handler))
                    .route("/me", get(handlers::auth::me::handler))
            })
            .nest("/api/v1/episodes", {
                Router::new()
                    .route(
                        "/",
                        get(handlers::episode::get_list::handler)
                            .post(handlers::episode::create::handler),
                    )
                    .route(
                        "/:episode_id",
                        get(handlers::episode::get_one::handler)
                            .put(handlers::episode::update::handler)
                            .delete(handlers::episode::delete::handler),
                    )
                    .layer(DefaultBodyLimit::max(upload_body_limit))
            })
            .layer(Extension(pool))
            .layer(Extension(auth_keys))
    })
    .await
}

async fn run<State>(
    state: State,
    config: &pm_app::Config,
    add_routes: impl FnOnce(Router<State>) -> Router<State>,
) -> Result<(), axum::BoxError>
where
    State: Clone + Send + Sync + 'static,
{
    // build our application with a route
    let app = app(state, config, add_routes);

    let host: std::net::IpAddr = config
        .host
        .parse()
        .expect("host is not a valid IP address");

    let addr = SocketAddr::from((host, config.port));
    tracing::debug!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    Ok(())
}

fn app<State>(
    state: State,
    config: &pm_app::Config,
    add_routes: impl FnOnce(Router<State>) -> Router<State>,
) -> Router
where
    State: Clone + Send + Sync + 'static,
{
    let cors = if config.cors_allowed_origins.trim() == "*" {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allowed_origins
            .split(',')
            .map(|s| s.trim().parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .expect("cors_allowed_origins contains an invalid origin");

        CorsLayer::new().allow_origin(origins)
    };

    // build our application with a route
    add_routes(Router::<State>::new())
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
        // Mark the `Authorization` request header as sensitive so it doesn't show in logs
        .layer(SetSensitiveRequestHeadersLayer::new(once(AUTHORIZATION)))
        // High level logging of requests and responses
        .layer(TraceLayer::new_for_http())
        // Compress responses
        .layer(CompressionLayer::new())
        // Propagate `X-Request-Id`s from requests to responses
        .layer(PropagateHeaderLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}

#[instrument]
async fn root() -> impl IntoResponse {
    axum::Json(
        json!({ "message": "Welcome to Podcast-to-Content Multiplier API" }),
    )
}

#[instrument]
async fn health() -> impl IntoResponse {
    tracing::info!("health check");

    axum::Json(json!({ "status" : "UP" }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        )
        .expect("failed to install signal handler")
        .recv()
        .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::warn!("signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use tokio::runtime::Runtime;

    use super::*;

    #[test]
    fn test_health() {
        let rt = Runtime::new().unwrap();
        let response = rt.block_on(health()).into_response();
        assert_eq!(response.status(), 200);
    }

    #[test]
    fn test_root() {
        let rt = Runtime::new().unwrap();
        let response = rt.block_on(root()).into_response();
        assert_eq!(response.status(), 200);
    }
}
