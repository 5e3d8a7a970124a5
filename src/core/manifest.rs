//! core::manifest
//!
//! Expand a tag set into its output representations.
//!
//! # Outputs
//!
//! - **metadata** - embedded keywords: the genre's metadata head, then each
//!   tag's ASCII variant, falling back to its plain variant
//! - **social** - platform tags: the genre's social head, then each tag's
//!   social variant, falling back to its plain variant
//! - **filename** - the single non-special tag verbatim, or the genre's
//!   default fragment when zero or several remain
//!
//! Tags with none of the preferred variants are left out of that list.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use folio::core::genre::Genre;
//! use folio::core::manifest::{GenreConfig, GenreTable, ManifestationResolver};
//! use folio::core::taxonomy::{Category, TagRecord, TagTaxonomy};
//! use folio::core::types::TagSet;
//!
//! let mut records = HashMap::new();
//! records.insert("oak".to_string(), TagRecord::new("tree").with_plain("Oak").with_ascii("oak"));
//! records.insert("ash".to_string(), TagRecord::new("tree").with_plain("Ash"));
//! let taxonomy = TagTaxonomy::new(records);
//!
//! let mut genres = GenreTable::new();
//! genres.insert(
//!     Genre::Category(Category::new("tree")),
//!     GenreConfig::new("Flora", "#flora", "mixed-flora"),
//! );
//!
//! let resolver = ManifestationResolver::new(&taxonomy, &genres);
//! let tags: TagSet = ["oak", "ash"].into_iter().collect();
//! let manifestation = resolver.manifest(&tags).unwrap();
//!
//! assert_eq!(manifestation.filename, "mixed-flora");
//! assert_eq!(manifestation.metadata, vec!["Flora", "oak", "Ash"]);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::genre::{Genre, GenreResolver};
use super::taxonomy::{TagTaxonomy, Variant};
use super::types::TagSet;

/// Errors from manifestation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("no manifestation configured for genre '{genre}'")]
    ConfigurationMissing { genre: String },
}

/// Per-genre manifestation settings.
///
/// ```toml
/// [genres.tree]
/// metadata_head = "Flora"
/// social_head = "#flora"
/// default_fragment = "mixed-flora"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenreConfig {
    pub metadata_head: String,
    pub social_head: String,
    pub default_fragment: String,
}

impl GenreConfig {
    pub fn new(
        metadata_head: impl Into<String>,
        social_head: impl Into<String>,
        default_fragment: impl Into<String>,
    ) -> Self {
        Self {
            metadata_head: metadata_head.into(),
            social_head: social_head.into(),
            default_fragment: default_fragment.into(),
        }
    }
}

/// Genre → manifestation settings.
pub type GenreTable = HashMap<Genre, GenreConfig>;

/// The three output representations of a tag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifestation {
    pub genre: String,
    pub metadata: Vec<String>,
    pub social: Vec<String>,
    pub filename: String,
}

const METADATA_PREFERENCE: [Variant; 2] = [Variant::Ascii, Variant::Plain];
const SOCIAL_PREFERENCE: [Variant; 2] = [Variant::Social, Variant::Plain];

/// Expands tag sets using a taxonomy and a genre table.
#[derive(Debug, Clone, Copy)]
pub struct ManifestationResolver<'a> {
    taxonomy: &'a TagTaxonomy,
    genres: &'a GenreTable,
}

impl<'a> ManifestationResolver<'a> {
    pub fn new(taxonomy: &'a TagTaxonomy, genres: &'a GenreTable) -> Self {
        Self { taxonomy, genres }
    }

    /// Manifest `tags`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::ConfigurationMissing` if the tag set's genre
    /// has no entry in the genre table.
    pub fn manifest(&self, tags: &TagSet) -> Result<Manifestation, ManifestError> {
        let genre = GenreResolver::new(self.taxonomy).genre(tags);
        let config = self
            .genres
            .get(&genre)
            .ok_or_else(|| ManifestError::ConfigurationMissing {
                genre: genre.to_string(),
            })?;

        let metadata = self.expand(&config.metadata_head, tags, &METADATA_PREFERENCE);
        let social = self.expand(&config.social_head, tags, &SOCIAL_PREFERENCE);
        let filename = self.filename(tags, config);

        tracing::debug!(%genre, filename = %filename, "manifested tag set");

        Ok(Manifestation {
            genre: genre.to_string(),
            metadata,
            social,
            filename,
        })
    }

    fn expand(&self, head: &str, tags: &TagSet, preference: &[Variant]) -> Vec<String> {
        std::iter::once(head.to_string())
            .chain(tags.iter().filter_map(|tag| {
                self.taxonomy
                    .get(tag)
                    .and_then(|record| record.preferred(preference))
                    .map(str::to_string)
            }))
            .collect()
    }

    fn filename(&self, tags: &TagSet, config: &GenreConfig) -> String {
        let mut ordinary = tags.iter().filter(|tag| !self.taxonomy.is_special(tag));
        match (ordinary.next(), ordinary.next()) {
            (Some(only), None) => only.to_string(),
            _ => config.default_fragment.clone(),
        }
    }
}
