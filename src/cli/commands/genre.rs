//! genre command - Show the genre of a tag set

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

use super::helpers::tag_set;

/// Print the genre key for `tags`.
pub fn genre(ctx: &Context, tags: &[String]) -> Result<()> {
    let library = ctx.load_library()?;
    let tags = tag_set(tags);

    for tag in tags.iter() {
        match library.taxonomy().category(tag) {
            Some(category) => output::debug(format!("{tag}: {category}"), ctx.verbosity()),
            None => output::debug(format!("{tag}: (not in taxonomy)"), ctx.verbosity()),
        }
    }

    output::result(library.genre_resolver().genre(&tags));
    Ok(())
}
