//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads the library from the configuration (if it needs one)
//! 2. Parses command-specific arguments into domain values
//! 3. Calls into [`crate::core`] or [`crate::exif`]
//! 4. Formats and displays output
//!
//! Handlers are public so tests can call them without spawning the binary.

mod argfile;
mod completion;
mod compose;
mod config_cmd;
mod genre;
mod helpers;
mod manifest;
mod resolve;
mod series;

// Re-export command functions for testing and direct invocation
pub use argfile::argfile;
pub use completion::completion;
pub use compose::{compose, composition};
pub use config_cmd::{check as config_check, init as config_init, path as config_path};
pub use genre::genre;
pub use helpers::{parse_numbers, parse_property};
pub use manifest::{format_manifestation, manifest};
pub use resolve::resolve;
pub use series::{describe as describe_series, list as series_list, show as series_show};

use crate::cli::args::{Command, ConfigAction, SeriesAction};
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Series { action } => match action {
            SeriesAction::List => series::list(ctx),
            SeriesAction::Show { name } => series::show(ctx, &name),
        },
        Command::Resolve {
            series,
            numbers,
            props,
            policy,
            limit,
            pattern,
        } => resolve::resolve(
            ctx,
            &series,
            &numbers,
            &props,
            policy,
            limit.as_deref(),
            pattern,
        ),
        Command::Genre { tags } => genre::genre(ctx, &tags),
        Command::Manifest { tags, json } => manifest::manifest(ctx, &tags, json),
        Command::Compose {
            series,
            original,
            numbers,
            title,
            tags,
            props,
        } => compose::compose(
            ctx,
            &series,
            &original,
            &numbers,
            title.as_deref(),
            &tags,
            &props,
        ),
        Command::Argfile {
            out,
            target,
            title,
            comment,
            tags,
            raw,
            overwrite,
            series,
            numbers,
        } => argfile::argfile(
            ctx,
            &out,
            &target,
            &title,
            &comment,
            &tags,
            raw,
            overwrite,
            series.as_deref(),
            &numbers,
        ),
        Command::Config { action } => match action {
            ConfigAction::Path => config_cmd::path(ctx),
            ConfigAction::Check => config_cmd::check(ctx),
            ConfigAction::Init { path } => config_cmd::init(ctx, path.as_deref()),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
