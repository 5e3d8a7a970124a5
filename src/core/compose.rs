//! core::compose
//!
//! Compose final file names and archive paths.
//!
//! # Reserved properties
//!
//! - `title` ([`TITLE_PROPERTY`]) - supplied by the caller on the identity
//! - `tags` ([`TAGS_PROPERTY`]) - filled in here with the manifestation's
//!   filename fragment, but only when the series template references it
//!
//! Series whose template does not reference `tags` never compute a
//! manifestation; their name is exactly the template resolution.
//!
//! # Paths
//!
//! `<root>/<series folder>/<name>.<original extension>`
//!
//! Only the path is computed. Moving or copying the file is up to the caller.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::identity::PageIdentity;
use super::library::Library;
use super::manifest::{ManifestError, Manifestation};
use super::template::{Clock, MissingPolicy, TemplateError, TemplateResolver};
use super::types::{AxisName, TagSet};

/// Property key holding the page title.
pub const TITLE_PROPERTY: &str = "title";

/// Property key the manifestation's filename fragment is bound to.
pub const TAGS_PROPERTY: &str = "tags";

/// Errors from composing names and paths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("series '{0}' did not resolve to a complete name")]
    Incomplete(String),
}

/// A composed file name and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub name: String,
    pub path: PathBuf,
    /// Present only for series whose template references `tags`.
    pub manifestation: Option<Manifestation>,
}

/// Combines template resolution and tag manifestation.
#[derive(Debug)]
pub struct FilenameComposer<'a> {
    library: &'a Library,
    resolver: TemplateResolver,
}

impl<'a> FilenameComposer<'a> {
    pub fn new(library: &'a Library) -> Self {
        Self {
            library,
            resolver: library.template_resolver(),
        }
    }

    /// Use `clock` for timestamp fragments.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.resolver = self.resolver.with_clock(clock);
        self
    }

    /// Compose the file name for `identity`.
    ///
    /// # Errors
    ///
    /// Returns `ComposeError::Template` if any fragment is missing (names are
    /// resolved with [`MissingPolicy::Fail`]) and `ComposeError::Manifest` if
    /// the tag set's genre is not configured.
    pub fn compose_name(
        &self,
        identity: &PageIdentity,
        tags: &TagSet,
    ) -> Result<(String, Option<Manifestation>), ComposeError> {
        let series = identity.series();

        let (bound, manifestation) = if series.references_property(TAGS_PROPERTY) {
            let manifestation = self.library.manifestation_resolver().manifest(tags)?;
            let bound = identity
                .clone()
                .with_property(TAGS_PROPERTY, manifestation.filename.as_str());
            (bound, Some(manifestation))
        } else {
            (identity.clone(), None)
        };

        let name = self
            .resolver
            .resolve(&bound, MissingPolicy::Fail, None)?
            .ok_or_else(|| ComposeError::Incomplete(series.name().to_string()))?;
        Ok((name, manifestation))
    }

    /// Compose the name and archive path for `identity`.
    ///
    /// The extension is taken from `original`; an original without an
    /// extension produces a path without one.
    pub fn compose(
        &self,
        identity: &PageIdentity,
        tags: &TagSet,
        original: &Path,
    ) -> Result<Composition, ComposeError> {
        let (name, manifestation) = self.compose_name(identity, tags)?;

        let file_name = match original.extension() {
            Some(ext) => format!("{name}.{}", ext.to_string_lossy()),
            None => name.clone(),
        };
        let path = self
            .library
            .root()
            .join(identity.series().folder())
            .join(file_name);

        tracing::debug!(path = %path.display(), "composed archive path");

        Ok(Composition {
            name,
            path,
            manifestation,
        })
    }

    /// A glob pattern matching every archived file for a partial identity.
    ///
    /// Missing fragments (and axes after `limit`) become `*`, and a trailing
    /// `.*` matches any extension.
    pub fn search_pattern(
        &self,
        identity: &PageIdentity,
        limit: Option<&AxisName>,
    ) -> Result<String, ComposeError> {
        let series = identity.series();
        let folder = self.library.root().join(series.folder());
        let base = format!("{}{}", folder.display(), std::path::MAIN_SEPARATOR);

        let pattern = self
            .resolver
            .clone()
            .with_base(base)
            .resolve(identity, MissingPolicy::Glob, limit)?
            .ok_or_else(|| ComposeError::Incomplete(series.name().to_string()))?;
        Ok(format!("{pattern}.*"))
    }
}
