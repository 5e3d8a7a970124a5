//! resolve command - Resolve a series template for a page identity

use anyhow::{bail, Result};

use crate::cli::Context;
use crate::core::compose::FilenameComposer;
use crate::core::template::MissingPolicy;
use crate::core::types::AxisName;
use crate::ui::output;

use super::helpers::build_identity;

/// Resolve and print a name (or, with `pattern`, an archive search pattern).
pub fn resolve(
    ctx: &Context,
    series: &str,
    numbers: &[String],
    props: &[String],
    policy: MissingPolicy,
    limit: Option<&str>,
    pattern: bool,
) -> Result<()> {
    let library = ctx.load_library()?;
    let identity = build_identity(&library, series, numbers, props)?;
    let limit = limit.map(AxisName::new).transpose()?;

    if pattern {
        let composer = FilenameComposer::new(&library);
        output::result(composer.search_pattern(&identity, limit.as_ref())?);
        return Ok(());
    }

    output::debug(
        format!("resolving '{}' with policy {}", series, policy),
        ctx.verbosity(),
    );

    match library
        .template_resolver()
        .resolve(&identity, policy, limit.as_ref())?
    {
        Some(name) => {
            output::result(name);
            Ok(())
        }
        None => bail!("no name: series '{}' could not be fully resolved", series),
    }
}
