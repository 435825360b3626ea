// tmdb-companion - Caching TMDB API companion backend
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tmdb_companion::cli::Args;
use tmdb_companion::config::AppConfig;
use tmdb_companion::server::{create_router, AppState};
use tmdb_companion::utils::logging;
use tokio::signal;
use tracing::info;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting tmdb-companion v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the runtime sized from config
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers.max(1))
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: AppConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let purge_interval = config.cache.purge_interval();

    // Phase 4: Construct shared client, cache and session table
    let state = AppState::new(config)?;
    let purge_task = purge_interval.map(|every| {
        info!("Purging expired cache entries every {:?}", every);
        state.cache.clone().spawn_purge_task(every)
    });

    // Phase 5: Build and start HTTP server
    let app = create_router(state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(task) = purge_task {
        task.abort();
    }

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
