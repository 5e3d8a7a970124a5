//! argfile command - Append a metadata record to an argument file

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::library::Library;
use crate::core::manifest::Manifestation;
use crate::exif::{self, OverwritePolicy, PendingMetadata};
use crate::ui::output;

use super::compose::composition;
use super::helpers::tag_set;

/// Append one record to `out`.
///
/// With `series`, the record targets the composed archive path of `target`;
/// otherwise it targets `target` itself.
#[allow(clippy::too_many_arguments)]
pub fn argfile(
    ctx: &Context,
    out: &Path,
    target: &Path,
    title: &str,
    comment: &str,
    tags: &[String],
    raw: bool,
    overwrite: OverwritePolicy,
    series: Option<&str>,
    numbers: &[String],
) -> Result<()> {
    let library = ctx.load_library()?;

    let (path, composed) = match series {
        Some(series) => {
            let title = (!title.is_empty()).then_some(title);
            let composition = composition(&library, series, target, numbers, title, tags, &[])?;
            (composition.path, composition.manifestation)
        }
        None => (target.to_path_buf(), None),
    };

    let (keywords, manifestation) = keywords(&library, tags, raw, composed)?;

    let pending = PendingMetadata {
        title: title.to_string(),
        comment: comment.to_string(),
        tags: keywords,
        overwrite,
        path,
    };
    exif::append_to_file(out, &pending)
        .with_context(|| format!("Failed to append record to {}", out.display()))?;

    output::print(
        format!(
            "Appended record for {} to {}",
            pending.path.display(),
            out.display()
        ),
        ctx.verbosity(),
    );
    if let Some(manifestation) = manifestation {
        if !manifestation.social.is_empty() {
            output::print(
                format!("social: {}", manifestation.social.join(" ")),
                ctx.verbosity(),
            );
        }
    }

    Ok(())
}

/// Keywords for the record, plus the manifestation they came from.
///
/// Raw mode writes tags as given. Otherwise a non-empty tag set is
/// manifested, reusing the composer's manifestation when there is one.
fn keywords(
    library: &Library,
    tags: &[String],
    raw: bool,
    composed: Option<Manifestation>,
) -> Result<(Vec<String>, Option<Manifestation>)> {
    let tags = tag_set(tags);

    if raw {
        return Ok((tags.iter().map(str::to_string).collect(), None));
    }
    if tags.is_empty() {
        return Ok((Vec::new(), None));
    }

    let manifestation = match composed {
        Some(manifestation) => manifestation,
        None => library.manifestation_resolver().manifest(&tags)?,
    };
    Ok((manifestation.metadata.clone(), Some(manifestation)))
}

