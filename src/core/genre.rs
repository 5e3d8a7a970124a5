//! core::genre
//!
//! Derive a single genre from a tag set.
//!
//! # Rules
//!
//! 1. Map every tag to its category (unknown tags map to no category)
//! 2. Drop tags in the special category
//! 3. If every remaining tag has the same category, that is the genre
//! 4. Otherwise, or when nothing remains, the genre is [`Genre::Mixed`]
//!
//! Agreement is strict equality. One dissenting tag makes the set mixed.
//! When every remaining tag is unknown to the taxonomy they agree on having
//! no category, which yields [`Genre::Unclassified`].

use std::fmt;

use super::taxonomy::{Category, TagTaxonomy};
use super::types::TagSet;

/// Configuration key for [`Genre::Mixed`].
pub const MIXED_KEY: &str = "mixed";

/// Configuration key for [`Genre::Unclassified`].
pub const UNCLASSIFIED_KEY: &str = "unclassified";

/// The genre of a tag set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genre {
    /// All non-special tags share this category.
    Category(Category),
    /// Categories disagree, or no non-special tag was given.
    Mixed,
    /// All non-special tags are unknown to the taxonomy.
    Unclassified,
}

impl Genre {
    /// Parse a genre configuration key.
    ///
    /// ```
    /// use folio::core::genre::Genre;
    /// use folio::core::taxonomy::Category;
    ///
    /// assert_eq!(Genre::from_key("mixed"), Genre::Mixed);
    /// assert_eq!(Genre::from_key("tree"), Genre::Category(Category::new("tree")));
    /// ```
    pub fn from_key(key: &str) -> Self {
        match key {
            MIXED_KEY => Self::Mixed,
            UNCLASSIFIED_KEY => Self::Unclassified,
            other => Self::Category(Category::new(other)),
        }
    }

    /// The configuration key for this genre.
    pub fn key(&self) -> &str {
        match self {
            Self::Category(category) => category.as_str(),
            Self::Mixed => MIXED_KEY,
            Self::Unclassified => UNCLASSIFIED_KEY,
        }
    }

    /// Whether `name` is reserved for a non-category genre.
    pub fn is_reserved_key(name: &str) -> bool {
        name == MIXED_KEY || name == UNCLASSIFIED_KEY
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Computes genres against a taxonomy.
#[derive(Debug, Clone, Copy)]
pub struct GenreResolver<'a> {
    taxonomy: &'a TagTaxonomy,
}

impl<'a> GenreResolver<'a> {
    pub fn new(taxonomy: &'a TagTaxonomy) -> Self {
        Self { taxonomy }
    }

    /// Genre of `tags`.
    pub fn genre(&self, tags: &TagSet) -> Genre {
        let special = self.taxonomy.special();
        let mut categories = tags
            .iter()
            .map(|tag| self.taxonomy.category(tag))
            .filter(|category| *category != Some(special));

        let Some(first) = categories.next() else {
            return Genre::Mixed;
        };
        if categories.any(|category| category != first) {
            return Genre::Mixed;
        }

        match first {
            Some(category) => Genre::Category(category.clone()),
            None => Genre::Unclassified,
        }
    }
}
