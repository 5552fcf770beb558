//! Configuration management for mdcv.
//!
//! Parses `mdcv.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdcv.toml";

/// Default Tailwind invocation. `{input}` and `{output}` are replaced
/// with the resolved stylesheet paths.
const DEFAULT_CSS_BUILD_COMMAND: &str = "npx tailwindcss -i {input} -o {output} --minify";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override markdown source file.
    pub source: Option<PathBuf>,
    /// Override output directory.
    pub out_dir: Option<PathBuf>,
    /// Override live reload enabled flag.
    pub live_reload_enabled: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Document configuration (paths are relative strings from TOML).
    document: DocumentConfigRaw,
    /// Stylesheet configuration (paths are relative strings from TOML).
    css: CssConfigRaw,
    /// Live reload configuration.
    pub live_reload: LiveReloadConfig,
    /// PDF export configuration.
    pub pdf: PdfConfig,

    /// Resolved document configuration (set after loading).
    #[serde(skip)]
    pub document_resolved: DocumentConfig,
    /// Resolved stylesheet configuration (set after loading).
    #[serde(skip)]
    pub css_resolved: CssConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Raw document configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocumentConfigRaw {
    source: Option<String>,
    out_dir: Option<String>,
}

/// Resolved document configuration with absolute paths.
#[derive(Debug, Default, Clone)]
pub struct DocumentConfig {
    /// Markdown source file.
    pub source: PathBuf,
    /// Directory output files are written to.
    pub out_dir: PathBuf,
}

/// Raw stylesheet configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CssConfigRaw {
    input: Option<String>,
    output: Option<String>,
    build_command: Option<String>,
}

/// Resolved stylesheet configuration with absolute paths.
#[derive(Debug, Default, Clone)]
pub struct CssConfig {
    /// Tailwind entry stylesheet.
    pub input: PathBuf,
    /// Compiled stylesheet written by the build command.
    pub output: PathBuf,
    /// Build command template with `{input}`/`{output}` placeholders.
    pub build_command: String,
}

impl CssConfig {
    /// The build command with placeholders substituted.
    #[must_use]
    pub fn resolved_command(&self) -> String {
        self.build_command
            .replace("{input}", &self.input.display().to_string())
            .replace("{output}", &self.output.display().to_string())
    }
}

/// Live reload configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LiveReloadConfig {
    /// Whether live reload is enabled.
    pub enabled: bool,
    /// File patterns to watch for changes.
    pub watch_patterns: Option<Vec<String>>,
}

impl Default for LiveReloadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            watch_patterns: None,
        }
    }
}

/// PDF export configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Timeout for browser navigation and PDF capture, in seconds.
    pub timeout_secs: u64,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdcv.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source) = &settings.source {
            self.document_resolved.source.clone_from(source);
        }
        if let Some(out_dir) = &settings.out_dir {
            self.document_resolved.out_dir.clone_from(out_dir);
        }
        if let Some(live_reload_enabled) = settings.live_reload_enabled {
            self.live_reload.enabled = live_reload_enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            document: DocumentConfigRaw::default(),
            css: CssConfigRaw::default(),
            live_reload: LiveReloadConfig::default(),
            pdf: PdfConfig::default(),
            document_resolved: DocumentConfig {
                source: base.join("cv.md"),
                out_dir: base.to_path_buf(),
            },
            css_resolved: CssConfig {
                input: base.join("src/styles.css"),
                output: base.join("dist/output.css"),
                build_command: DEFAULT_CSS_BUILD_COMMAND.to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        require_non_empty(&self.css_resolved.build_command, "css.build_command")?;

        if self.pdf.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "pdf.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.document_resolved = DocumentConfig {
            source: resolve(self.document.source.as_deref(), "cv.md"),
            out_dir: match self.document.out_dir.as_deref() {
                Some(dir) => config_dir.join(dir),
                None => config_dir.to_path_buf(),
            },
        };

        self.css_resolved = CssConfig {
            input: resolve(self.css.input.as_deref(), "src/styles.css"),
            output: resolve(self.css.output.as_deref(), "dist/output.css"),
            build_command: self
                .css
                .build_command
                .clone()
                .unwrap_or_else(|| DEFAULT_CSS_BUILD_COMMAND.to_owned()),
        };
    }
}
