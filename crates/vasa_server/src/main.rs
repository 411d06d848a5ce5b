//! vasa_server - REST server for the Vasa producer and marketplace store.
//!
//! See [`vasa_server::config`] for the environment variables it reads.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

use log::{error, info};
use tokio::net::TcpListener;
use vasa_core::{init_logging, open_pool, DbError};
use vasa_server::{build_router, AppState, ConfigError, ServerConfig};

#[derive(Debug)]
enum StartupError {
    Config(ConfigError),
    Logging(String),
    Db(DbError),
    Io(std::io::Error),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Logging(err) => write!(f, "logging setup failed: {err}"),
            Self::Db(err) => write!(f, "database setup failed: {err}"),
            Self::Io(err) => write!(f, "server io error: {err}"),
        }
    }
}

impl Error for StartupError {}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=server status=error error={err}");
            eprintln!("vasa_server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env().map_err(StartupError::Config)?;
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(StartupError::Logging)?;

    let database_path = config.database_path.clone();
    let pool_options = config.pool;
    let pool = tokio::task::spawn_blocking(move || open_pool(database_path, pool_options))
        .await
        .map_err(|err| StartupError::Io(std::io::Error::other(err)))?
        .map_err(StartupError::Db)?;

    let app = build_router(AppState::new(pool), config.api_key.clone());

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(StartupError::Io)?;
    info!(
        "event=server_listen module=server status=ok addr={} database={} api_key_configured={}",
        config.bind_addr,
        config.database_path.display(),
        config.api_key.is_some()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Io)?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=signal_listen module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
}
