//! Server entry point.
//!
//! Reads `ORGDIR_*` configuration, initializes logging, migrates the
//! database once up front, then serves until Ctrl-C.

use log::{error, info};
use orgdir_core::db::{open_db, SessionFactory};
use orgdir_core::init_logging;
use orgdir_server::{build_router, AppState, ServerConfig};
use std::error::Error;
use std::process::ExitCode;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_start module=server status=error error={err}");
            eprintln!("orgdir_server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;
    init_logging(&config.log_level, config.log_dir.as_deref())?;

    // Migrations run here so request sessions only ever see a current schema.
    drop(open_db(&config.db_path)?);

    let state = AppState::new(
        SessionFactory::new(config.db_path.clone()),
        config.api_key.clone(),
    );
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        "event=server_start module=server status=ok bind={} db_path={}",
        config.bind_addr,
        config.db_path.display()
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
}
