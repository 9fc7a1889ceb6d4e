//! Tumor classifier HTTP server
//!
//! Serves a health check on `GET /` and predictions on `POST /predict`
//! from a classifier loaded once at startup.

mod api;
mod error;
mod handlers;
mod response;
mod state;

pub use api::create_router;
pub use error::{ApiError, MSG_EMPTY_PAYLOAD, MSG_INTERNAL, MSG_NAMED_COUNT, MSG_POSITIONAL_COUNT};
pub use handlers::{run_prediction, PredictionResponse, HEALTH_MESSAGE};
pub use response::{render_json, PrettyJson, JSON_CONTENT_TYPE};
pub use state::AppState;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::inference::ModelArtifact;

/// Server configuration
///
/// Environment overrides (`API_HOST`, `API_PORT`, `MODEL_PATH`,
/// `STRICT_FEATURE_NAMES`) are applied by the CLI before this is built.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serialized classifier loaded at startup
    pub model_path: PathBuf,
    /// Require the canonical feature names for the named payload shape
    pub strict_feature_names: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            model_path: PathBuf::from("modelo.json"),
            strict_feature_names: false,
        }
    }
}

/// Load the model artifact and build the shared state
pub fn load_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let artifact = ModelArtifact::load(&config.model_path)?;
    info!(
        path = %config.model_path.display(),
        trained_at = %artifact.trained_at,
        features = artifact.feature_names.len(),
        "Classification model loaded into memory"
    );
    Ok(AppState::from_config(Arc::new(artifact), config)?)
}

/// Start the server with the given configuration
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();
    let state = Arc::new(load_state(&config)?);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        address = %addr,
        strict_feature_names = config.strict_feature_names,
        pid = std::process::id(),
        started_at = %start_time.to_rfc3339(),
        "Server listening and ready to accept connections"
    );

    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        let uptime = chrono::Utc::now().signed_duration_since(start_time);
        info!(
            uptime_secs = uptime.num_seconds(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
