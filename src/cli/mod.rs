//! cli
//!
//! Command-line interface layer for folio.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load the configuration once per invocation
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! [`commands`], which build a [`crate::core::library::Library`] from the
//! configuration and call into [`crate::core`] and [`crate::exif`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::core::config::{Config, ConfigLoadResult};
use crate::core::library::Library;
use crate::ui::output::{self, Verbosity};

/// Per-invocation settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Explicit config file (`--config`).
    pub config: Option<PathBuf>,
    /// Debug output enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// Context that reads the given config file.
    pub fn with_config(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Load the configuration, reporting warnings.
    pub fn load_config(&self) -> Result<Config> {
        let ConfigLoadResult { config, warnings } =
            Config::load(self.config.as_deref()).context("Failed to load config")?;

        for warning in &warnings {
            match &warning.path {
                Some(path) => output::warn(
                    format!("{}: {}", path.display(), warning.message),
                    self.verbosity(),
                ),
                None => output::warn(&warning.message, self.verbosity()),
            }
        }

        Ok(config)
    }

    /// Load the configuration and build the library from it.
    pub fn load_library(&self) -> Result<Library> {
        let config = self.load_config()?;
        config
            .into_library()
            .context("Failed to build library from config")
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context {
        config: cli.config.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}
