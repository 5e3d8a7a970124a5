//! compose command - Compose the archive path for a scanned file

use std::path::Path;

use anyhow::Result;

use crate::cli::Context;
use crate::core::compose::{Composition, FilenameComposer, TITLE_PROPERTY};
use crate::core::library::Library;
use crate::ui::output;

use super::helpers::{build_identity, tag_set};
use super::manifest::format_manifestation;

/// Print the archive path `original` would be stored at.
#[allow(clippy::too_many_arguments)]
pub fn compose(
    ctx: &Context,
    series: &str,
    original: &Path,
    numbers: &[String],
    title: Option<&str>,
    tags: &[String],
    props: &[String],
) -> Result<()> {
    let library = ctx.load_library()?;
    let composition = composition(&library, series, original, numbers, title, tags, props)?;

    output::debug(format!("name: {}", composition.name), ctx.verbosity());
    if let Some(manifestation) = &composition.manifestation {
        output::debug(format_manifestation(manifestation), ctx.verbosity());
    }

    output::result(composition.path.display());
    Ok(())
}

/// Build the identity from arguments and compose it.
///
/// `title`, when given, is bound to the `title` property.
pub fn composition(
    library: &Library,
    series: &str,
    original: &Path,
    numbers: &[String],
    title: Option<&str>,
    tags: &[String],
    props: &[String],
) -> Result<Composition> {
    let mut identity = build_identity(library, series, numbers, props)?;
    if let Some(title) = title {
        identity.set_property(TITLE_PROPERTY, title);
    }

    let composition = FilenameComposer::new(library).compose(&identity, &tag_set(tags), original)?;
    Ok(composition)
}
