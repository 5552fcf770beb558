//! Development server for mdcv.
//!
//! Serves the rendered CV over HTTP using axum:
//! - `GET /` renders the markdown source on every request, so a browser
//!   refresh always shows the latest content
//! - `GET /dist/{*path}` serves compiled assets next to the stylesheet
//! - WebSocket endpoint for live reload during development
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use mdcv_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 7878,
//!         source: PathBuf::from("cv.md"),
//!         css_output: PathBuf::from("dist/output.css"),
//!         live_reload_enabled: true,
//!         watch_patterns: None,
//!         verbose: false,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod live_reload;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;
use tokio::sync::broadcast;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Markdown source file.
    pub source: PathBuf,
    /// Compiled stylesheet path.
    pub css_output: PathBuf,
    /// Enable live reload.
    pub live_reload_enabled: bool,
    /// Watch patterns for live reload.
    pub watch_patterns: Option<Vec<String>>,
    /// Enable verbose output.
    pub verbose: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            source: PathBuf::from("cv.md"),
            css_output: PathBuf::from("dist/output.css"),
            live_reload_enabled: false,
            watch_patterns: None,
            verbose: false,
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the file watcher or listener fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Create live reload manager if enabled
    let live_reload = if config.live_reload_enabled {
        let (tx, _rx) = broadcast::channel::<live_reload::ReloadEvent>(100);
        let mut manager = live_reload::LiveReloadManager::new(
            live_reload::watch_roots(&config.source, &config.css_output),
            config.watch_patterns.clone(),
            tx,
        );
        manager.start()?;
        Some(manager)
    } else {
        None
    };

    // Create app state
    let state = Arc::new(AppState {
        source: config.source.clone(),
        css_output: config.css_output.clone(),
        live_reload,
        verbose: config.verbose,
    });

    // Create router
    let app = app::create_router(state);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from mdcv config.
#[must_use]
pub fn server_config_from_config(config: &mdcv_config::Config, verbose: bool) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source: config.document_resolved.source.clone(),
        css_output: config.css_resolved.output.clone(),
        live_reload_enabled: config.live_reload.enabled,
        watch_patterns: config.live_reload.watch_patterns.clone(),
        verbose,
    }
}
