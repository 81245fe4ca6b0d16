//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `build.master_document`
//! - `build.manifest`
//! - `build.output_dir`
//! - `diagnostics.save_errors`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the root page of the hierarchy.
    pub master_document: Option<String>,
    /// Override the project manifest path.
    pub manifest: Option<PathBuf>,
    /// Override the output directory.
    pub output_dir: Option<PathBuf>,
    /// Override whether `.fjson` files are written.
    pub output_json: Option<bool>,
    /// Override the fail-on-errors flag.
    pub fail_on_errors: Option<bool>,
    /// Override the error log path.
    pub save_errors: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,
    /// Diagnostics configuration (paths are relative strings from TOML).
    diagnostics: DiagnosticsConfigRaw,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Resolved diagnostics configuration (set after loading).
    #[serde(skip)]
    pub diagnostics_resolved: DiagnosticsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw build configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    master_document: Option<String>,
    manifest: Option<String>,
    output_dir: Option<String>,
    output_json: Option<bool>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Page whose TOC declaration is walked first.
    pub master_document: String,
    /// Project manifest listing documents, titles and TOC declarations.
    pub manifest: PathBuf,
    /// Directory holding rendered `.html` pages; `.fjson` files are written here.
    pub output_dir: PathBuf,
    /// Whether `.fjson` files are written.
    pub output_json: bool,
}

/// How a class of non-fatal build findings is handled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// Do not record the finding.
    Ignore,
    /// Record the finding as a build warning.
    #[default]
    Warn,
}

/// Raw diagnostics configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DiagnosticsConfigRaw {
    missing_children: Option<DiagnosticLevel>,
    orphans: Option<DiagnosticLevel>,
    fail_on_errors: Option<bool>,
    save_errors: Option<String>,
}

/// Resolved diagnostics configuration.
#[derive(Debug, Default)]
pub struct DiagnosticsConfig {
    /// TOC declarations naming pages absent from the manifest.
    pub missing_children: DiagnosticLevel,
    /// Pages not reachable from the master document.
    pub orphans: DiagnosticLevel,
    /// Exit non-zero when the build recorded any diagnostic.
    pub fail_on_errors: bool,
    /// File the diagnostics are written to.
    pub save_errors: Option<PathBuf>,
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
        /// Config field path (e.g., "`build.output_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_OUT`} not set").
        message: String,
    },
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
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
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

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(master_document) = &settings.master_document {
            self.build_resolved.master_document.clone_from(master_document);
        }
        if let Some(manifest) = &settings.manifest {
            self.build_resolved.manifest.clone_from(manifest);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(output_json) = settings.output_json {
            self.build_resolved.output_json = output_json;
        }
        if let Some(fail_on_errors) = settings.fail_on_errors {
            self.diagnostics_resolved.fail_on_errors = fail_on_errors;
        }
        if let Some(save_errors) = &settings.save_errors {
            self.diagnostics_resolved.save_errors = Some(save_errors.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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
            build: BuildConfigRaw::default(),
            diagnostics: DiagnosticsConfigRaw::default(),
            build_resolved: BuildConfig {
                master_document: "index".to_owned(),
                manifest: base.join("_build/project.json"),
                output_dir: base.join("_build/html"),
                output_json: true,
            },
            diagnostics_resolved: DiagnosticsConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
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
        let master = &self.build_resolved.master_document;
        require_non_empty(master, "build.master_document")?;

        if master.starts_with('/') || master.ends_with('/') {
            return Err(ConfigError::Validation(
                "build.master_document must be a page name without leading or trailing '/'"
                    .to_owned(),
            ));
        }

        if Path::new(master)
            .extension()
            .is_some_and(|ext| ext == "html" || ext == "fjson")
        {
            return Err(ConfigError::Validation(
                "build.master_document must not include a file extension".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::process_env().expand_fields([
            ("build.master_document", &mut self.build.master_document),
            ("build.manifest", &mut self.build.manifest),
            ("build.output_dir", &mut self.build.output_dir),
            ("diagnostics.save_errors", &mut self.diagnostics.save_errors),
        ])
    }

    /// Resolve relative paths against `base` and fill in defaults.
    fn resolve_paths(&mut self, base: &Path) {
        let defaults = Self::default_with_base(base).build_resolved;

        self.build_resolved = BuildConfig {
            master_document: self
                .build
                .master_document
                .clone()
                .unwrap_or(defaults.master_document),
            manifest: self
                .build
                .manifest
                .as_ref()
                .map_or(defaults.manifest, |p| base.join(p)),
            output_dir: self
                .build
                .output_dir
                .as_ref()
                .map_or(defaults.output_dir, |p| base.join(p)),
            output_json: self.build.output_json.unwrap_or(defaults.output_json),
        };

        self.diagnostics_resolved = DiagnosticsConfig {
            missing_children: self.diagnostics.missing_children.unwrap_or_default(),
            orphans: self.diagnostics.orphans.unwrap_or_default(),
            fail_on_errors: self.diagnostics.fail_on_errors.unwrap_or(false),
            save_errors: self.diagnostics.save_errors.as_ref().map(|p| base.join(p)),
        };
    }
}
