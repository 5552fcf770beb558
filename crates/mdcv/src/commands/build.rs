//! `mdcv build` command implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use mdcv_config::{CliSettings, Config};
use mdcv_core::DocumentTitle;
use mdcv_export::{build_stylesheet, export_pdf};
use mdcv_renderer::{Layout, RenderOptions, Theme, render_document};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Render the default theme (implied when no theme flag is given).
    #[arg(long, group = "theme")]
    default: bool,

    /// Render the dark theme.
    #[arg(long, group = "theme")]
    default_dark: bool,

    /// Render the light theme.
    #[arg(long, group = "theme")]
    light: bool,

    /// Write the rendered HTML instead of capturing a PDF.
    #[arg(long)]
    html_only: bool,

    /// Path to configuration file (default: auto-discover mdcv.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source file (overrides config).
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Enable verbose output (show build and capture logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, the stylesheet build, or the
    /// PDF capture fails.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source: self.source.clone(),
            out_dir: self.out_dir.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.field("Source", config.document_resolved.source.display());

        let css = build_stylesheet(&config.css_resolved)?;

        let markdown =
            std::fs::read_to_string(&config.document_resolved.source).map_err(|source| {
                CliError::Source {
                    path: config.document_resolved.source.clone(),
                    source,
                }
            })?;

        let title = DocumentTitle::parse(&markdown);
        let options = RenderOptions {
            theme: self.theme(),
            layout: Layout::Print,
        };
        let html = render_document(&markdown, &css, &options);

        std::fs::create_dir_all(&config.document_resolved.out_dir)?;
        let base = title.base_filename();

        if self.html_only {
            let path = config
                .document_resolved
                .out_dir
                .join(format!("{base}.html"));
            std::fs::write(&path, html)?;
            output.done(&format!("HTML written to {}", path.display()));
        } else {
            let path = config.document_resolved.out_dir.join(format!("{base}.pdf"));
            let timeout = Duration::from_secs(config.pdf.timeout_secs);
            export_pdf(html, &path, timeout).await?;
            output.done(&format!("PDF written to {}", path.display()));
        }

        Ok(())
    }

    /// Resolve the theme from the flag group.
    fn theme(&self) -> Theme {
        match (self.default, self.default_dark, self.light) {
            (_, true, _) => Theme::Dark,
            (_, _, true) => Theme::Light,
            _ => Theme::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(default: bool, default_dark: bool, light: bool) -> BuildArgs {
        BuildArgs {
            default,
            default_dark,
            light,
            html_only: false,
            config: None,
            source: None,
            out_dir: None,
            verbose: false,
        }
    }

    #[test]
    fn test_theme_flags() {
        assert_eq!(args(false, false, false).theme(), Theme::Default);
        assert_eq!(args(true, false, false).theme(), Theme::Default);
        assert_eq!(args(false, true, false).theme(), Theme::Dark);
        assert_eq!(args(false, false, true).theme(), Theme::Light);
    }
}
