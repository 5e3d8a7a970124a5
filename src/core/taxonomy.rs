//! core::taxonomy
//!
//! The tag lookup table.
//!
//! Every known tag has a category and up to three display variants, one per
//! output target:
//!
//! - `plain` - the general display name
//! - `ascii` - an ASCII-safe name for embedded metadata keywords
//! - `social` - the form used on the social platform
//!
//! One category is reserved as *special*. Special tags are carried through
//! to the outputs but never take part in genre agreement or the filename
//! fragment.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default name of the reserved special category.
pub const DEFAULT_SPECIAL_CATEGORY: &str = "special";

/// A tag category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which display variant to read from a [`TagRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Plain,
    Ascii,
    Social,
}

/// A tag's entry in the taxonomy.
///
/// ```toml
/// [tags.oak]
/// category = "tree"
/// plain = "Oak"
/// ascii = "oak"
/// social = "#oak"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagRecord {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascii: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<String>,
}

impl TagRecord {
    /// A record with no display variants.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: Category::new(category),
            plain: None,
            ascii: None,
            social: None,
        }
    }

    pub fn with_plain(mut self, name: impl Into<String>) -> Self {
        self.plain = Some(name.into());
        self
    }

    pub fn with_ascii(mut self, name: impl Into<String>) -> Self {
        self.ascii = Some(name.into());
        self
    }

    pub fn with_social(mut self, name: impl Into<String>) -> Self {
        self.social = Some(name.into());
        self
    }

    /// The requested variant, if present.
    pub fn variant(&self, variant: Variant) -> Option<&str> {
        match variant {
            Variant::Plain => self.plain.as_deref(),
            Variant::Ascii => self.ascii.as_deref(),
            Variant::Social => self.social.as_deref(),
        }
    }

    /// The first present variant in `preference` order.
    pub fn preferred(&self, preference: &[Variant]) -> Option<&str> {
        preference.iter().find_map(|v| self.variant(*v))
    }
}

/// Static tag lookup table.
#[derive(Debug, Clone)]
pub struct TagTaxonomy {
    records: HashMap<String, TagRecord>,
    special: Category,
}

impl Default for TagTaxonomy {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl TagTaxonomy {
    /// Build a taxonomy using the default special category.
    pub fn new(records: HashMap<String, TagRecord>) -> Self {
        Self {
            records,
            special: Category::new(DEFAULT_SPECIAL_CATEGORY),
        }
    }

    /// Use `category` as the reserved special category.
    pub fn with_special(mut self, category: Category) -> Self {
        self.special = category;
        self
    }

    pub fn get(&self, tag: &str) -> Option<&TagRecord> {
        self.records.get(tag)
    }

    /// Category of `tag`, or `None` for tags the taxonomy does not know.
    pub fn category(&self, tag: &str) -> Option<&Category> {
        self.records.get(tag).map(|r| &r.category)
    }

    pub fn special(&self) -> &Category {
        &self.special
    }

    /// Whether `tag` belongs to the special category.
    pub fn is_special(&self, tag: &str) -> bool {
        self.category(tag) == Some(&self.special)
    }

    /// All categories used by at least one tag, sorted.
    pub fn categories(&self) -> Vec<&Category> {
        let mut categories: Vec<_> = self.records.values().map(|r| &r.category).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> TagTaxonomy {
        let mut records = HashMap::new();
        records.insert(
            "oak".to_string(),
            TagRecord::new("tree").with_plain("Oak").with_ascii("oak"),
        );
        records.insert("ash".to_string(), TagRecord::new("tree").with_plain("Ash"));
        records.insert("wip".to_string(), TagRecord::new("special"));
        TagTaxonomy::new(records)
    }

    #[test]
    fn category_lookup() {
        let tax = taxonomy();
        assert_eq!(tax.category("oak"), Some(&Category::new("tree")));
        assert_eq!(tax.category("elm"), None);
    }

    #[test]
    fn special_detection() {
        let tax = taxonomy();
        assert!(tax.is_special("wip"));
        assert!(!tax.is_special("oak"));
        assert!(!tax.is_special("unknown"));
    }

    #[test]
    fn custom_special_category() {
        let tax = taxonomy().with_special(Category::new("tree"));
        assert!(tax.is_special("oak"));
        assert!(!tax.is_special("wip"));
    }

    #[test]
    fn variant_preference() {
        let tax = taxonomy();
        let oak = tax.get("oak").unwrap();
        let ash = tax.get("ash").unwrap();
        let order = [Variant::Ascii, Variant::Plain];

        assert_eq!(oak.preferred(&order), Some("oak"));
        assert_eq!(ash.preferred(&order), Some("Ash"));
        assert_eq!(ash.preferred(&[Variant::Social]), None);
    }

    #[test]
    fn categories_sorted_unique() {
        let tax = taxonomy();
        let names: Vec<&str> = tax.categories().into_iter().map(Category::as_str).collect();
        assert_eq!(names, vec!["special", "tree"]);
    }

    #[test]
    fn record_from_toml() {
        let record: TagRecord = toml::from_str(
            r##"
            category = "tree"
            plain = "Oak"
            social = "#oak"
            "##,
        )
        .unwrap();
        assert_eq!(record.variant(Variant::Social), Some("#oak"));
        assert_eq!(record.variant(Variant::Ascii), None);

        let unknown: Result<TagRecord, _> = toml::from_str("category = \"x\"\nnick = \"y\"");
        assert!(unknown.is_err());
    }
}
