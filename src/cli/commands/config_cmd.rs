//! config command - Locate, validate or create the configuration file

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::{Config, STARTER_CONFIG};
use crate::ui::output;

/// Print the path of the config file that would be loaded.
pub fn path(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    match config.loaded_from() {
        Some(path) => output::result(path.display()),
        None => output::print(
            "No config file found; using built-in defaults.",
            ctx.verbosity(),
        ),
    }
    Ok(())
}

/// Validate the configuration and summarize it.
///
/// Warnings are printed while loading; errors fail the command.
pub fn check(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let source = config
        .loaded_from()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());
    let (series, tags, genres) = (
        config.file.series.len(),
        config.file.tags.len(),
        config.file.genres.len(),
    );

    config
        .into_library()
        .context("Failed to build library from config")?;

    output::print(
        format!(
            "{}: ok ({} series, {} tags, {} genres)",
            source, series, tags, genres
        ),
        ctx.verbosity(),
    );
    Ok(())
}

/// Write the starter configuration.
///
/// Refuses to replace an existing file.
pub fn init(ctx: &Context, path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_config_path()?,
    };

    Config::write_new(&path, STARTER_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    output::print(format!("Wrote {}", path.display()), ctx.verbosity());
    Ok(())
}
