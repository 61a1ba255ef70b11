use anyhow::Result;
use axum::{middleware, Router};
use tracing::info;

use super::http_layers::log_requests;
use super::jobs::make_job_routes;
use super::state::{ServerState, SharedJobStore, SharedTokenVerifier, SharedUserStore};
use super::users::make_user_routes;
use super::ServerConfig;

pub fn make_app(
    config: ServerConfig,
    job_store: SharedJobStore,
    user_store: SharedUserStore,
    token_verifier: SharedTokenVerifier,
) -> Router {
    let state = ServerState {
        config,
        job_store,
        user_store,
        token_verifier,
    };

    Router::new()
        .nest("/job", make_job_routes(state.clone()))
        .nest("/user", make_user_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    job_store: SharedJobStore,
    user_store: SharedUserStore,
    token_verifier: SharedTokenVerifier,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, job_store, user_store, token_verifier);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Listening on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
