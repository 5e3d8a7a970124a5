//! manifest command - Expand a tag set into its three representations

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::manifest::Manifestation;
use crate::ui::output;

use super::helpers::tag_set;

/// Print the manifestation of `tags`, as text or JSON.
pub fn manifest(ctx: &Context, tags: &[String], json: bool) -> Result<()> {
    let library = ctx.load_library()?;
    let manifestation = library
        .manifestation_resolver()
        .manifest(&tag_set(tags))?;

    if json {
        let text = serde_json::to_string_pretty(&manifestation)
            .context("Failed to serialize manifestation")?;
        output::result(text);
    } else {
        output::result(format_manifestation(&manifestation));
    }
    Ok(())
}

/// Plain-text rendering: one labelled line per representation.
pub fn format_manifestation(manifestation: &Manifestation) -> String {
    [
        format!("genre:    {}", manifestation.genre),
        format!("metadata: {}", manifestation.metadata.join(", ")),
        format!("social:   {}", manifestation.social.join(" ")),
        format!("filename: {}", manifestation.filename),
    ]
    .join("\n")
}
