//! helpers - Argument parsing shared by the page commands
//!
//! # Key Functions
//!
//! - `parse_numbers` - Positional page numbers, with `_` for unknown
//! - `parse_property` - `KEY=VALUE` property arguments
//! - `build_identity` - Series lookup plus identity construction

use anyhow::{anyhow, bail, Context as _, Result};

use crate::core::identity::PageIdentity;
use crate::core::library::Library;
use crate::core::types::{PropertyValue, TagSet};

/// Placeholder for an unknown page number.
pub const UNKNOWN_NUMBER: &str = "_";

/// Parse page numbers in axis order.
///
/// `_` stands for an unknown position.
pub fn parse_numbers(values: &[String]) -> Result<Vec<Option<u32>>> {
    values
        .iter()
        .map(|value| match value.as_str() {
            UNKNOWN_NUMBER => Ok(None),
            number => number
                .parse::<u32>()
                .map(Some)
                .with_context(|| format!("Invalid page number '{}'", number)),
        })
        .collect()
}

/// Parse a `KEY=VALUE` property argument.
pub fn parse_property(arg: &str) -> Result<(String, PropertyValue)> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid property '{}': expected KEY=VALUE", arg))?;

    if key.is_empty() {
        bail!("Invalid property '{}': key cannot be empty", arg);
    }

    let value = match value.parse::<PropertyValue>() {
        Ok(value) => value,
        Err(never) => match never {},
    };
    Ok((key.to_string(), value))
}

/// Look up `series` and build an identity from command-line arguments.
pub fn build_identity(
    library: &Library,
    series: &str,
    numbers: &[String],
    props: &[String],
) -> Result<PageIdentity> {
    let series = library.registry().lookup_str(series)?;
    let numbers = parse_numbers(numbers)?;

    let mut identity = PageIdentity::new(series, numbers)?;
    for prop in props {
        let (key, value) = parse_property(prop)?;
        identity.set_property(key, value);
    }

    Ok(identity)
}

/// Collect tag arguments, dropping duplicates.
pub fn tag_set(tags: &[String]) -> TagSet {
    tags.iter().map(String::as_str).collect()
}
