//! core::library
//!
//! The constructed-once tables everything else resolves against.
//!
//! A [`Library`] bundles the series registry, the tag taxonomy, the genre
//! table, the archival root, and the timezone used for timestamp fragments.
//! It is normally built from configuration (see
//! [`Config::into_library`](crate::core::config::Config::into_library)) and
//! then passed by reference to the resolvers.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};

use super::genre::GenreResolver;
use super::manifest::{GenreTable, ManifestationResolver};
use super::series::SeriesRegistry;
use super::taxonomy::TagTaxonomy;
use super::template::TemplateResolver;

/// Series, tags and genres for one archive.
#[derive(Debug)]
pub struct Library {
    registry: SeriesRegistry,
    taxonomy: TagTaxonomy,
    genres: GenreTable,
    root: PathBuf,
    timezone: FixedOffset,
}

impl Default for Library {
    fn default() -> Self {
        Self::new(
            SeriesRegistry::new(),
            TagTaxonomy::default(),
            GenreTable::new(),
            PathBuf::from("."),
        )
    }
}

impl Library {
    pub fn new(
        registry: SeriesRegistry,
        taxonomy: TagTaxonomy,
        genres: GenreTable,
        root: PathBuf,
    ) -> Self {
        Self {
            registry,
            taxonomy,
            genres,
            root,
            timezone: Utc.fix(),
        }
    }

    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn registry(&self) -> &SeriesRegistry {
        &self.registry
    }

    pub fn taxonomy(&self) -> &TagTaxonomy {
        &self.taxonomy
    }

    pub fn genres(&self) -> &GenreTable {
        &self.genres
    }

    /// Archival root all output paths are placed under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    /// A template resolver with this library's timezone and no base prefix.
    pub fn template_resolver(&self) -> TemplateResolver {
        TemplateResolver::new().with_timezone(self.timezone)
    }

    pub fn genre_resolver(&self) -> GenreResolver<'_> {
        GenreResolver::new(&self.taxonomy)
    }

    pub fn manifestation_resolver(&self) -> ManifestationResolver<'_> {
        ManifestationResolver::new(&self.taxonomy, &self.genres)
    }
}
