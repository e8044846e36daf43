use std::path::PathBuf;

use anyhow::Context as _;
use axum::{
    Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};

use crate::{command::serve::routes::AppState, logging, util};

mod routes;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ServeArg {
    /// Host interface to bind
    #[clap(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind
    #[clap(long, default_value_t = 8080)]
    port: u16,
    /// Spawn a random tile after every committed move
    #[clap(long)]
    spawn_tiles: bool,
    /// Path to an expectimax configuration file (JSON format)
    #[clap(long)]
    selector_config: Option<PathBuf>,
    /// Tracing filter, e.g. "info" or "twenty48_engine=debug"
    #[clap(long, default_value = "info")]
    log: String,
}

pub(crate) fn run(arg: &ServeArg) -> anyhow::Result<()> {
    let ServeArg {
        host,
        port,
        spawn_tiles,
        selector_config,
        log,
    } = arg;

    logging::init_stderr(log)?;
    let selector = util::build_selector(selector_config.as_deref())?;
    let state = AppState::new(Box::new(selector), *spawn_tiles);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(serve(state, host, *port))
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/api/state", get(routes::get_state))
        .route("/api/clear_board", post(routes::clear_board))
        .route("/api/random_board", post(routes::random_board))
        .route("/api/set_cell", post(routes::set_cell))
        .route("/api/step_cell", post(routes::step_cell))
        .route("/api/ai_move", post(routes::ai_move))
        .route("/api/execute_direction", post(routes::execute_direction))
        .with_state(state)
}

async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    let addr = listener
        .local_addr()
        .context("Failed to read the bound address")?;
    tracing::info!(%addr, spawn_tiles = state.spawn_tiles(), "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(%err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown requested");
}
