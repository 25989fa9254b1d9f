//! Configuration loading and discovery.
//!
//! This module provides configuration file discovery by:
//! 1. Walking up from the current directory to find project config
//! 2. Loading user config from XDG config directory
//! 3. Merging with sensible defaults
//!
//! # Supported formats
//!
//! The following configuration file formats are supported:
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! # Config file locations (in order of precedence, highest first):
//! - `seo-lint.<ext>` in current directory or any parent
//! - `.seo-lint.<ext>` in current directory or any parent
//! - `seo.<ext>` in current directory or any parent
//! - `.seo.<ext>` in current directory or any parent
//! - `~/.config/seo-lint/config.<ext>` (user config)
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`
//!
//! Environment variables prefixed with `SEO_LINT_` override every file;
//! nested keys use `__`, e.g. `SEO_LINT_THRESHOLDS__MAX_SENTENCE_WORDS=25`.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use seo_lint_core::config::{Config, ConfigLoader};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("max density: {}", config.thresholds.max_keyword_density());
//! ```

use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, ConfigError, ConfigResult};

/// Keyword density ceiling preset.
///
/// Editors disagree on how much repetition reads as stuffing; the strict
/// profile flags anything above 2.5%, the lenient one above 3.5%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DensityProfile {
    /// Maximum density 2.5%.
    Strict,
    /// Maximum density 3.5% (default).
    #[default]
    Lenient,
}

impl DensityProfile {
    /// All profiles, in display order.
    pub const ALL: &'static [Self] = &[Self::Strict, Self::Lenient];

    /// Returns the profile name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }

    /// The maximum keyword density (percent) this profile allows.
    pub const fn max_density(&self) -> f64 {
        match self {
            Self::Strict => 2.5,
            Self::Lenient => 3.5,
        }
    }
}

impl std::fmt::Display for DensityProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DensityProfile {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|profile| profile.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnalysisError::UnknownProfile {
                name: s.to_string(),
                available: Self::ALL
                    .iter()
                    .map(Self::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Tunable limits for every check.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct Thresholds {
    /// Density ceiling preset; see [`Thresholds::max_keyword_density`].
    pub density_profile: DensityProfile,
    /// Minimum keyword density (percent).
    pub min_keyword_density: f64,
    /// Explicit maximum keyword density (percent); overrides the profile.
    pub max_keyword_density: Option<f64>,
    /// Sentences with more words than this are long.
    pub max_sentence_words: usize,
    /// Paragraphs with more words than this are long.
    pub max_paragraph_words: usize,
    /// Recommended words per image.
    pub words_per_image: usize,
    /// Words per image above which the image ratio check warns.
    pub max_acceptable_words_per_image: usize,
    /// Share of secondary keywords (percent) that must appear.
    pub min_secondary_keyword_percent: f64,
    /// Keyword density (percent) a single heading may reach.
    pub max_heading_density_percent: f64,
    /// Share of headings (percent) that may carry the keyword.
    pub max_headings_with_keyword_percent: f64,
    /// Score at or above which content is excellent.
    pub excellent_score_threshold: u8,
    /// Score at or above which content is good.
    pub good_score_threshold: u8,
    /// How many main keywords to suggest.
    pub main_keyword_suggestions: usize,
    /// How many secondary keywords to suggest.
    pub secondary_keyword_suggestions: usize,
    /// Hosts only suggest keywords for texts with more words than this.
    pub min_words_for_suggestions: usize,
    /// Inline colors that count as visual emphasis.
    pub emphasis_colors: Vec<String>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            density_profile: DensityProfile::default(),
            min_keyword_density: 0.5,
            max_keyword_density: None,
            max_sentence_words: 20,
            max_paragraph_words: 150,
            words_per_image: 350,
            max_acceptable_words_per_image: 400,
            min_secondary_keyword_percent: 70.0,
            max_heading_density_percent: 30.0,
            max_headings_with_keyword_percent: 50.0,
            excellent_score_threshold: 80,
            good_score_threshold: 60,
            main_keyword_suggestions: 3,
            secondary_keyword_suggestions: 5,
            min_words_for_suggestions: 50,
            emphasis_colors: ["blue", "rgb(0, 0, 255)", "#00f", "#0000ff"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl Thresholds {
    /// Thresholds with the given density profile and every other value
    /// defaulted.
    pub fn with_profile(profile: DensityProfile) -> Self {
        Self {
            density_profile: profile,
            ..Self::default()
        }
    }

    /// Effective maximum keyword density (percent).
    pub fn max_keyword_density(&self) -> f64 {
        self.max_keyword_density
            .unwrap_or_else(|| self.density_profile.max_density())
    }

    /// Reject values that would make the checks meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |field: &'static str, reason: String| {
            Err(ConfigError::InvalidThreshold { field, reason })
        };

        if !self.min_keyword_density.is_finite() || self.min_keyword_density < 0.0 {
            return invalid(
                "min_keyword_density",
                format!("must be a non-negative number, got {}", self.min_keyword_density),
            );
        }
        let max = self.max_keyword_density();
        if !max.is_finite() || max <= self.min_keyword_density {
            return invalid(
                "max_keyword_density",
                format!(
                    "must be greater than min_keyword_density ({}), got {max}",
                    self.min_keyword_density
                ),
            );
        }
        if self.max_sentence_words == 0 {
            return invalid("max_sentence_words", "must be at least 1".to_string());
        }
        if self.max_paragraph_words == 0 {
            return invalid("max_paragraph_words", "must be at least 1".to_string());
        }
        if self.words_per_image == 0 {
            return invalid("words_per_image", "must be at least 1".to_string());
        }
        for (field, value) in [
            (
                "min_secondary_keyword_percent",
                self.min_secondary_keyword_percent,
            ),
            (
                "max_heading_density_percent",
                self.max_heading_density_percent,
            ),
            (
                "max_headings_with_keyword_percent",
                self.max_headings_with_keyword_percent,
            ),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return invalid(field, format!("must be between 0 and 100, got {value}"));
            }
        }
        if self.excellent_score_threshold > 100 {
            return invalid(
                "excellent_score_threshold",
                format!("must be at most 100, got {}", self.excellent_score_threshold),
            );
        }
        if self.good_score_threshold > self.excellent_score_threshold {
            return invalid(
                "good_score_threshold",
                format!(
                    "must not exceed excellent_score_threshold ({}), got {}",
                    self.excellent_score_threshold, self.good_score_threshold
                ),
            );
        }
        Ok(())
    }
}

/// The configuration for seo-lint.
///
/// Deserialized from config files found during discovery (TOML, YAML, or
/// JSON) and from `SEO_LINT_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files. File logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Applies to both the CLI and the MCP server. Use
    /// `disable_input_limit` to remove the limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    pub disable_input_limit: bool,
    /// Limits used by every check.
    pub thresholds: Thresholds,
}

impl Config {
    /// Effective input size limit in bytes, or `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            return None;
        }
        Some(
            self.max_input_bytes
                .unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES),
        )
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report the actual config files without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup.
const APP_NAME: &str = "seo-lint";

/// Application names to search for config files (in precedence order, lowest first).
const APP_NAMES: &[&str] = &["seo", "seo-lint"];

/// Environment variable prefix.
const ENV_PREFIX: &str = "SEO_LINT_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from XDG directory.
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load (for testing or programmatic use).
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/seo-lint/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Set a boundary marker to stop directory traversal. Default is `.git`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Disable boundary marker (search all the way to filesystem root).
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Precedence (highest to lowest):
    /// 1. `SEO_LINT_*` environment variables
    /// 2. Explicit files (in order added via `with_file`)
    /// 3. Project config (closest to search root)
    /// 4. User config (`~/.config/seo-lint/config.<ext>`)
    /// 5. Default values
    ///
    /// Thresholds are validated after merging.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // SEO_LINT_LOG_LEVEL=debug, SEO_LINT_THRESHOLDS__DENSITY_PROFILE=strict, etc.
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        config.thresholds.validate()?;

        tracing::info!(
            log_level = config.log_level.as_str(),
            profile = config.thresholds.density_profile.as_str(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns all matching config files from the closest directory that has
    /// any match, ordered low-to-high precedence: `seo` names before
    /// `seo-lint` names, dotfiles before regular files within each name.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();

            for app_name in APP_NAMES {
                for ext in CONFIG_EXTENSIONS {
                    let dotfile = dir.join(format!(".{app_name}.{ext}"));
                    if dotfile.is_file() {
                        found.push(dotfile);
                    }
                }
                for ext in CONFIG_EXTENSIONS {
                    let regular = dir.join(format!("{app_name}.{ext}"));
                    if regular.is_file() {
                        found.push(regular);
                    }
                }
            }

            if !found.is_empty() {
                return found;
            }

            // Checked after the config files so a config beside the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    /// Find user config in XDG config directory.
    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the user config directory path.
///
/// Returns `~/.config/seo-lint/` on Linux, `~/Library/Application Support/seo-lint/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}
