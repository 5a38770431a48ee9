//! # homegraphd — homegraph daemon
//!
//! Composition root that wires the engine and HTTP adapter together and
//! starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize tracing
//! - Build the engine, optionally seeded with the default world
//! - Build the axum router and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context as _;
use tracing::info;
use tracing_subscriber::EnvFilter;

use homegraph_adapter_http_axum::router;
use homegraph_adapter_http_axum::state::AppState;
use homegraph_engine::{Engine, SystemClock};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let engine = if config.world.seed_default {
        Engine::with_default_world(SystemClock)
    } else {
        Engine::new(SystemClock)
    };
    info!(devices = engine.world().device_count(), "engine ready");

    let state = AppState::new(engine);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    info!(%bind_addr, "homegraphd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Serve until interrupted; shutdown needs no cleanup beyond dropping.
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
