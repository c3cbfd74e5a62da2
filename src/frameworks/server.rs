// Framework bootstrap for the arena server runtime.

use crate::domain::Tuning;
use crate::frameworks::config;
use crate::interface_adapters::log_sink::TracingSnapshotSink;
use crate::interface_adapters::net::{
    leaderboard_handler, snapshot_handler, spawn_arena_serializer, ws_handler,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{ArenaSettings, SnapshotSink, sink_task, spawn_arena};

use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Serves the arena on `listener` with built-in tuning.
pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    run_with_tuning(listener, Tuning::default()).await
}

pub async fn run_with_tuning(listener: tokio::net::TcpListener, tuning: Tuning) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(tuning);
    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/leaderboard", get(leaderboard_handler))
        .route("/snapshot", get(snapshot_handler))
        .with_state(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let tuning = config::load_tuning()
        .inspect_err(|e| tracing::error!(error = %e, "failed to load tuning"))
        .map_err(std::io::Error::other)?;

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run_with_tuning(listener, tuning).await
}

fn build_state(tuning: Tuning) -> Arc<AppState> {
    let arena = spawn_arena(ArenaSettings {
        input_channel_capacity: config::INPUT_CHANNEL_CAPACITY,
        world_broadcast_capacity: config::WORLD_BROADCAST_CAPACITY,
        notice_channel_capacity: config::NOTICE_CHANNEL_CAPACITY,
        tick_interval: config::tick_interval(),
        tuning,
        seed: config::rng_seed(),
    });

    // Serializer and sink subscribe here, after the snapshot is captured on the tick.
    spawn_arena_serializer(&arena);
    let sink: Arc<dyn SnapshotSink> =
        Arc::new(TracingSnapshotSink::new(config::summary_every_ticks()));
    tokio::spawn(sink_task(arena.world_tx.subscribe(), sink));

    Arc::new(AppState { arena })
}
