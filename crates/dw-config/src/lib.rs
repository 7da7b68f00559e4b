//! Configuration management for DW.
//!
//! Parses `dw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [docs]
//! source_dir = "docs"
//!
//! [template]
//! path = "styles.yaml"
//! table_style = "Light Grid Accent 1"
//!
//! [output]
//! path = "${BUILD_DIR:-build}/manual.json"
//! ```
//!
//! CLI settings are applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` (error if unset) and `${VAR:-default}`.
//! Expanded fields:
//! - `docs.source_dir`
//! - `template.path`
//! - `template.table_style`
//! - `output.path`

mod expand;

use dw_sink::DEFAULT_TABLE_STYLE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the directory image URIs are resolved against.
    pub source_dir: Option<PathBuf>,
    /// Override the style template file.
    pub template: Option<PathBuf>,
    /// Override the default table style.
    pub table_style: Option<String>,
    /// Override the output file.
    pub output: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dw.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    docs: DocsConfigRaw,
    template: TemplateConfigRaw,
    output: OutputConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved template configuration (set after loading).
    #[serde(skip)]
    pub template_resolved: TemplateConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TemplateConfigRaw {
    path: Option<String>,
    table_style: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    path: Option<String>,
}

/// Resolved documentation source settings.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory image URIs are resolved against.
    pub source_dir: PathBuf,
}

/// Resolved template settings.
#[derive(Debug)]
pub struct TemplateConfig {
    /// YAML style catalog; `None` uses the built-in Word defaults.
    pub path: Option<PathBuf>,
    /// Table style used unless a document directive overrides it.
    pub table_style: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: None,
            table_style: DEFAULT_TABLE_STYLE.to_owned(),
        }
    }
}

/// Resolved output settings.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Output document; `None` derives it from the input tree path.
    pub path: Option<PathBuf>,
}

impl OutputConfig {
    /// Output path for the tree at `input`.
    ///
    /// Without a configured path the document goes next to the input as
    /// `<stem>.document.json`.
    #[must_use]
    pub fn path_for(&self, input: &Path) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            let stem = input
                .file_stem()
                .map_or_else(|| "document".into(), |s| s.to_string_lossy());
            input.with_file_name(format!("{stem}.document.json"))
        })
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.path`").
        field: String,
        /// Error message (e.g., "${`BUILD_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dw.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(template) = &settings.template {
            self.template_resolved.path = Some(template.clone());
        }
        if let Some(table_style) = &settings.table_style {
            self.template_resolved.table_style.clone_from(table_style);
        }
        if let Some(output) = &settings.output {
            self.output_resolved.path = Some(output.clone());
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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Default config with paths relative to `base`.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            template: TemplateConfigRaw::default(),
            output: OutputConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            template_resolved: TemplateConfig::default(),
            output_resolved: OutputConfig::default(),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.template_resolved.table_style, "template.table_style")?;
        self.validate_template_path()?;
        Ok(())
    }

    fn validate_template_path(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.template_resolved.path else {
            return Ok(());
        };
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if !is_yaml {
            return Err(ConfigError::Validation(format!(
                "template.path must be a .yaml or .yml file, got {}",
                path.display()
            )));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref path) = self.template.path {
            self.template.path = Some(expand::expand_env(path, "template.path")?);
        }
        if let Some(ref style) = self.template.table_style {
            self.template.table_style = Some(expand::expand_env(style, "template.table_style")?);
        }
        if let Some(ref path) = self.output.path {
            self.output.path = Some(expand::expand_env(path, "output.path")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
        };
        self.template_resolved = TemplateConfig {
            path: self.template.path.as_deref().map(|p| config_dir.join(p)),
            table_style: self
                .template
                .table_style
                .clone()
                .unwrap_or_else(|| DEFAULT_TABLE_STYLE.to_owned()),
        };
        self.output_resolved = OutputConfig {
            path: self.output.path.as_deref().map(|p| config_dir.join(p)),
        };
    }
}
