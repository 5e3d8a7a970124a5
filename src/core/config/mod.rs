//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! A single TOML file describes the archive: its root, the known book
//! series, the tag taxonomy, and per-genre manifestation settings. The file
//! is read once and turned into an immutable [`Library`].
//!
//! # Locations
//!
//! Searched in order:
//! 1. An explicit path (the `--config` flag)
//! 2. `$FOLIO_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/folio/config.toml`
//! 4. `~/.folio/config.toml` (canonical write location)
//!
//! A missing file is not an error; defaults (an empty library) are used.
//! An explicit path that does not exist is an error.
//!
//! # Example
//!
//! ```no_run
//! use folio::core::config::Config;
//!
//! let result = Config::load(None).unwrap();
//! for warning in &result.warnings {
//!     eprintln!("warning: {}", warning.message);
//! }
//! let library = result.config.into_library().unwrap();
//! println!("{} series", library.registry().len());
//! ```

pub mod schema;

pub use schema::{FolioConfig, SeriesConfig};

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::genre::Genre;
use crate::core::library::Library;
use crate::core::manifest::GenreTable;
use crate::core::series::SeriesRegistry;
use crate::core::taxonomy::{Category, TagTaxonomy, DEFAULT_SPECIAL_CATEGORY};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config file '{0}' already exists")]
    AlreadyExists(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The file that triggered the warning, if one was loaded.
    pub path: Option<PathBuf>,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (defaults if no file was found)
    pub file: FolioConfig,
    /// Path the configuration was loaded from
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `explicit`, or from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation, or if `explicit` cannot be read.
    pub fn load(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find()?,
        };

        let config = match path {
            Some(path) => {
                let file = Self::read_config(&path)?;
                Config {
                    file,
                    path: Some(path),
                }
            }
            None => Config::default(),
        };

        config.file.validate()?;
        let warnings = config.warnings();

        tracing::debug!(
            path = ?config.path,
            series = config.file.series.len(),
            tags = config.file.tags.len(),
            "loaded configuration"
        );

        Ok(ConfigLoadResult { config, warnings })
    }

    /// Parse configuration from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` or `ConfigError::InvalidValue`.
    pub fn parse(contents: &str) -> Result<ConfigLoadResult, ConfigError> {
        let file: FolioConfig = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })?;
        file.validate()?;

        let config = Config { file, path: None };
        let warnings = config.warnings();
        Ok(ConfigLoadResult { config, warnings })
    }

    /// Find the first existing config file in the default locations.
    fn find() -> Result<Option<PathBuf>, ConfigError> {
        // 1. Check $FOLIO_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/folio/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("folio/config.toml");
            if path.exists() {
                return Ok(Some(path));
            }
        }

        // 3. Check ~/.folio/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".folio/config.toml");
            if path.exists() {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FolioConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Non-fatal problems with an otherwise valid configuration.
    fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut warn = |message: String| {
            warnings.push(ConfigWarning {
                message,
                path: self.path.clone(),
            })
        };

        let mut seen = HashSet::new();
        for series in &self.file.series {
            if !seen.insert(series.name.as_str()) {
                warn(format!(
                    "series '{}' is defined more than once; the last definition wins",
                    series.name
                ));
            }
        }

        let special = self.special_category();
        let mut missing: Vec<&str> = self
            .file
            .tags
            .values()
            .map(|record| record.category.as_str())
            .filter(|category| *category != special.as_str())
            .filter(|category| !self.file.genres.contains_key(*category))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        for category in missing {
            warn(format!(
                "category '{}' has no [genres.{}] entry; manifesting its tags will fail",
                category, category
            ));
        }

        warnings
    }

    /// Get the canonical path for the config file.
    ///
    /// Returns `~/.folio/config.toml`.
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".folio/config.toml"))
    }

    /// Write a config file atomically, refusing to replace an existing one.
    ///
    /// Creates parent directories if needed. Uses atomic write
    /// (write to temp file, then rename) to prevent corruption.
    pub fn write_new(path: &Path, contents: &str) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        // Never write something we could not load back.
        let file: FolioConfig = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Self::write_config_atomic(path, contents)
    }

    /// Write a config file atomically.
    fn write_config_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        // Write to temp file in same directory (for atomic rename)
        let temp_path = path.with_extension("toml.tmp");
        let written = Self::write_and_rename(&temp_path, path, contents);
        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written
    }

    fn write_and_rename(temp_path: &Path, path: &Path, contents: &str) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::WriteError {
            path: temp_path.to_path_buf(),
            source,
        };

        let mut file = fs::File::create(temp_path).map_err(write_error)?;
        file.write_all(contents.as_bytes()).map_err(write_error)?;
        file.sync_all().map_err(write_error)?;
        drop(file);

        // Atomic rename
        fs::rename(temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Archival root.
    ///
    /// Defaults to the current directory if not configured.
    pub fn root(&self) -> PathBuf {
        self.file.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// The reserved special category.
    ///
    /// Defaults to "special" if not configured.
    pub fn special_category(&self) -> Category {
        Category::new(
            self.file
                .special_category
                .as_deref()
                .unwrap_or(DEFAULT_SPECIAL_CATEGORY),
        )
    }

    /// Get the path the configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Build the immutable library described by this configuration.
    ///
    /// Series are registered in file order, so a later duplicate replaces
    /// an earlier one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the configuration is invalid.
    pub fn into_library(self) -> Result<Library, ConfigError> {
        let timezone = self.file.parsed_timezone()?;
        let special = self.special_category();
        let root = self.root();

        let registry = SeriesRegistry::new();
        for series in &self.file.series {
            registry.register(series.build()?);
        }

        let records: HashMap<_, _> = self.file.tags.into_iter().collect();
        let taxonomy = TagTaxonomy::new(records).with_special(special);

        let genres: GenreTable = self
            .file
            .genres
            .into_iter()
            .map(|(key, config)| (Genre::from_key(&key), config))
            .collect();

        Ok(Library::new(registry, taxonomy, genres, root).with_timezone(timezone))
    }
}

/// Starter configuration written by `folio config init`.
pub const STARTER_CONFIG: &str = r##"# folio configuration

# Archival root; series folders are created beneath it.
root = "."

# Fixed UTC offset used by timestamp fragments.
timezone = "+00:00"

# Tags in this category never decide a genre or a filename fragment.
special_category = "special"

[[series]]
name = "journal"
folder = "Journal"
specificities = [{ axis = "page", min = 1, max = 999 }]
template = ["J", { axis = "page", pad = 3 }, ".", { property = "title" }]

[tags.wip]
category = "special"
plain = "WIP"

[genres.mixed]
metadata_head = "Misc"
social_head = "#misc"
default_fragment = "misc"
"##;
