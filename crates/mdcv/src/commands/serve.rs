//! `mdcv serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdcv_config::{CliSettings, Config};
use mdcv_export::build_stylesheet;
use mdcv_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover mdcv.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source file (overrides config).
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (show watch and timing logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,

    /// Enable live reload (default: enabled).
    #[arg(long)]
    live_reload: Option<bool>,

    /// Disable live reload.
    #[arg(long, conflicts_with = "live_reload")]
    no_live_reload: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let live_reload_enabled = self.resolve_live_reload_enabled();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source: self.source,
            live_reload_enabled,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Compile the stylesheet up front so the first page load is styled.
        // Failure is not fatal; the page handler serves unstyled markup.
        match build_stylesheet(&config.css_resolved) {
            Ok(_) => output.field("Stylesheet", config.css_resolved.output.display()),
            Err(e) => output.warning(&format!("Stylesheet build failed, serving unstyled: {e}")),
        }

        output.field(
            "Server",
            format!("http://{}:{}", config.server.host, config.server.port),
        );
        output.field("Source", config.document_resolved.source.display());
        if config.live_reload.enabled {
            output.status("Live reload: enabled");
        } else {
            output.status("Live reload: disabled");
        }

        let server_config = server_config_from_config(&config, self.verbose);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// Resolve `live_reload_enabled` from --live-reload/--no-live-reload flags.
    fn resolve_live_reload_enabled(&self) -> Option<bool> {
        self.no_live_reload.then_some(false).or(self.live_reload)
    }
}
