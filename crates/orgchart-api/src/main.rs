//! Org chart API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p orgchart-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use orgchart_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first: the log format depends on the environment
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        address = %config.server.address(),
        presence_configured = config.matrix.is_configured(),
        "Configuration loaded"
    );

    orgchart_api::run(config).await?;

    info!("Server stopped");
    Ok(())
}
