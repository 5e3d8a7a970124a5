//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`SeriesName`] - Validated book series name
//! - [`AxisName`] - Validated specificity axis name
//! - [`Specificity`] - A named, bounded numeric axis
//! - [`PropertyValue`] - Value kinds stored in a page's property table
//! - [`TagSet`] - Ordered, duplicate-free set of tags
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use folio::core::types::{AxisName, SeriesName, Specificity};
//!
//! let series = SeriesName::new("journal").unwrap();
//! let page = Specificity::new(AxisName::new("page").unwrap(), 1, 999).unwrap();
//! assert!(page.contains(7));
//!
//! assert!(SeriesName::new("bad/name").is_err());
//! assert!(Specificity::new(AxisName::new("page").unwrap(), 9, 1).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid series name: {0}")]
    InvalidSeriesName(String),

    #[error("invalid axis name: {0}")]
    InvalidAxisName(String),

    #[error("invalid bounds for axis '{axis}': min {min} > max {max}")]
    InvalidBounds { axis: String, min: u32, max: u32 },
}

/// A validated book series name.
///
/// The name doubles as the default output folder, so it must be usable as a
/// single path component:
/// - Cannot be empty
/// - Cannot be `.` or `..`
/// - Cannot contain `/`, `\`, whitespace, or ASCII control characters
///
/// # Example
///
/// ```
/// use folio::core::types::SeriesName;
///
/// let name = SeriesName::new("field-notes").unwrap();
/// assert_eq!(name.as_str(), "field-notes");
///
/// assert!(SeriesName::new("").is_err());
/// assert!(SeriesName::new("..").is_err());
/// assert!(SeriesName::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeriesName(String);

impl SeriesName {
    /// Create a new validated series name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidSeriesName` if the name is not a valid path component.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidSeriesName(
                "series name cannot be empty".into(),
            ));
        }
        if name == "." || name == ".." {
            return Err(TypeError::InvalidSeriesName(format!(
                "series name cannot be '{name}'"
            )));
        }
        for c in name.chars() {
            if c == '/' || c == '\\' {
                return Err(TypeError::InvalidSeriesName(format!(
                    "series name cannot contain '{c}'"
                )));
            }
            if c.is_whitespace() || c.is_control() {
                return Err(TypeError::InvalidSeriesName(
                    "series name cannot contain whitespace or control characters".into(),
                ));
            }
        }
        Ok(())
    }

    /// Get the series name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SeriesName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<SeriesName> for String {
    fn from(name: SeriesName) -> Self {
        name.0
    }
}

impl AsRef<str> for SeriesName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated specificity axis name (e.g. `page`, `subpage`).
///
/// Axis names are non-empty and contain no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AxisName(String);

impl AxisName {
    /// Create a new validated axis name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidAxisName` if the name is empty or contains whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidAxisName("axis name cannot be empty".into()));
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidAxisName(format!(
                "axis name '{name}' cannot contain whitespace"
            )));
        }
        Ok(Self(name))
    }

    /// Get the axis name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AxisName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AxisName> for String {
    fn from(name: AxisName) -> Self {
        name.0
    }
}

impl fmt::Display for AxisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, bounded numeric axis used to identify a page within a series.
///
/// Bounds are inclusive and `min <= max` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SpecificityRepr", into = "SpecificityRepr")]
pub struct Specificity {
    axis: AxisName,
    min: u32,
    max: u32,
}

impl Specificity {
    /// Create a new specificity.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBounds` if `min > max`.
    pub fn new(axis: AxisName, min: u32, max: u32) -> Result<Self, TypeError> {
        if min > max {
            return Err(TypeError::InvalidBounds {
                axis: axis.0,
                min,
                max,
            });
        }
        Ok(Self { axis, min, max })
    }

    /// The axis name.
    pub fn axis(&self) -> &AxisName {
        &self.axis
    }

    /// Inclusive lower bound.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Inclusive upper bound.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Check whether `value` lies within the axis bounds.
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Serialized shape of a [`Specificity`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpecificityRepr {
    axis: AxisName,
    min: u32,
    max: u32,
}

impl TryFrom<SpecificityRepr> for Specificity {
    type Error = TypeError;

    fn try_from(repr: SpecificityRepr) -> Result<Self, Self::Error> {
        Self::new(repr.axis, repr.min, repr.max)
    }
}

impl From<Specificity> for SpecificityRepr {
    fn from(spec: Specificity) -> Self {
        Self {
            axis: spec.axis,
            min: spec.min,
            max: spec.max,
        }
    }
}

/// A value stored in a page's property table.
///
/// The set of kinds is closed so template evaluation stays exhaustive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Integer value, rendered in decimal.
    Number(i64),
    /// Free text, rendered verbatim.
    Text(String),
    /// A symbolic value (`:name` on the command line), rendered without the colon.
    Symbol(String),
}

impl PropertyValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) | Self::Symbol(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for PropertyValue {
    type Err = std::convert::Infallible;

    /// Parse a command-line property value.
    ///
    /// `:name` is a symbol, anything that parses as an integer is a number,
    /// everything else is text.
    ///
    /// ```
    /// use folio::core::types::PropertyValue;
    ///
    /// assert_eq!("12".parse::<PropertyValue>().unwrap(), PropertyValue::Number(12));
    /// assert_eq!(":draft".parse::<PropertyValue>().unwrap(), PropertyValue::Symbol("draft".into()));
    /// assert_eq!("draft".parse::<PropertyValue>().unwrap(), PropertyValue::text("draft"));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(symbol) = s.strip_prefix(':').filter(|rest| !rest.is_empty()) {
            return Ok(Self::Symbol(symbol.to_string()));
        }
        Ok(match s.parse::<i64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(s.to_string()),
        })
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// An ordered set of tags.
///
/// Insertion order is kept (it determines keyword order in the metadata
/// output) and duplicates are dropped.
///
/// # Example
///
/// ```
/// use folio::core::types::TagSet;
///
/// let tags: TagSet = ["oak", "ash", "oak"].into_iter().collect();
/// assert_eq!(tags.len(), 2);
/// assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["oak", "ash"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, returning `false` if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    /// Check whether the set contains `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Iterate over tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod series_name {
        use super::*;

        #[test]
        fn valid_names() {
            assert!(SeriesName::new("journal").is_ok());
            assert!(SeriesName::new("field-notes_2").is_ok());
            assert!(SeriesName::new("v1.2").is_ok());
        }

        #[test]
        fn rejects_path_separators() {
            assert!(SeriesName::new("a/b").is_err());
            assert!(SeriesName::new("a\\b").is_err());
        }

        #[test]
        fn rejects_dot_components() {
            assert!(SeriesName::new(".").is_err());
            assert!(SeriesName::new("..").is_err());
        }

        #[test]
        fn serde_rejects_invalid() {
            let parsed: Result<SeriesName, _> = serde_json::from_str("\"a b\"");
            assert!(parsed.is_err());
        }
    }

    mod specificity {
        use super::*;

        fn axis(name: &str) -> AxisName {
            AxisName::new(name).unwrap()
        }

        #[test]
        fn bounds_inclusive() {
            let spec = Specificity::new(axis("page"), 1, 10).unwrap();
            assert!(spec.contains(1));
            assert!(spec.contains(10));
            assert!(!spec.contains(0));
            assert!(!spec.contains(11));
        }

        #[test]
        fn single_value_axis() {
            let spec = Specificity::new(axis("side"), 3, 3).unwrap();
            assert!(spec.contains(3));
        }

        #[test]
        fn inverted_bounds_rejected() {
            let err = Specificity::new(axis("page"), 5, 4).unwrap_err();
            assert_eq!(
                err,
                TypeError::InvalidBounds {
                    axis: "page".into(),
                    min: 5,
                    max: 4
                }
            );
        }

        #[test]
        fn deserialize_validates() {
            let ok: Specificity =
                toml::from_str("axis = \"page\"\nmin = 1\nmax = 9").unwrap();
            assert_eq!(ok.axis().as_str(), "page");

            let bad: Result<Specificity, _> = toml::from_str("axis = \"page\"\nmin = 9\nmax = 1");
            assert!(bad.is_err());
        }

        #[test]
        fn empty_axis_rejected() {
            assert!(AxisName::new("").is_err());
            assert!(AxisName::new("sub page").is_err());
        }
    }

    mod property_value {
        use super::*;

        #[test]
        fn display_forms() {
            assert_eq!(PropertyValue::Number(-3).to_string(), "-3");
            assert_eq!(PropertyValue::text("draft").to_string(), "draft");
            assert_eq!(PropertyValue::Symbol("final".into()).to_string(), "final");
        }

        #[test]
        fn lone_colon_is_text() {
            assert_eq!(":".parse::<PropertyValue>().unwrap(), PropertyValue::text(":"));
        }
    }

    mod tag_set {
        use super::*;

        #[test]
        fn insert_dedupes() {
            let mut tags = TagSet::new();
            assert!(tags.insert("oak"));
            assert!(!tags.insert("oak"));
            assert_eq!(tags.len(), 1);
        }

        #[test]
        fn keeps_insertion_order() {
            let tags: TagSet = ["c", "a", "b"].into_iter().collect();
            assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        }
    }
}
