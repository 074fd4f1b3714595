pub(crate) mod controllers;
pub(crate) mod core;
pub(crate) mod routes;
pub(crate) mod token;
pub(crate) mod types;
pub(crate) mod utils;

use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::core::error::ConfigError as Error;
use crate::core::{config::Args, state::AppState};
use crate::token::store::sweep_loop;

pub async fn run() -> Result<(), Error> {
    let config = Args::load()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_level).unwrap_or_default())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(&config)?;

    if config.verify_signature {
        tracing::info!("token signatures are verified on every guarded request");
    }

    if let Some(seconds) = config.token_sweep_interval {
        tracing::info!("sweeping expired tokens every {}s", seconds);

        let store = state.tokens.store().clone();

        tokio::spawn(async move {
            sweep_loop(store, Duration::from_secs(seconds.max(1))).await;
        });
    }

    let app = routes::router::routes(state, config.rate_limit);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(Error::IO)?;

    tracing::info!("listening on port {}", config.port);

    axum::serve(listener, app).await.map_err(Error::IO)?;

    Ok(())
}
