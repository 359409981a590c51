//! Rollcall API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p rollcall-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env`.

use rollcall_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first so the log format follows APP_ENV
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        storage = ?config.app.storage,
        port = config.api.port,
        "Configuration loaded"
    );

    if let Err(e) = rollcall_api::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
