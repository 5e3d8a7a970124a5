//! core::identity
//!
//! Page identity: a page-number vector bound to a book series.
//!
//! A position in the vector may be unbound (`None`), which lets callers
//! describe partially known pages ("page 12, any subpage") for search
//! patterns. Template resolution decides what an unbound position means.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use super::series::BookSeries;
use super::types::{AxisName, PropertyValue};

/// Errors from constructing a page identity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("series '{series}' has {expected} specificities but {actual} numbers were given")]
    LengthMismatch {
        series: String,
        expected: usize,
        actual: usize,
    },

    #[error("{axis} {value} is outside {min}..={max} for series '{series}'")]
    OutOfRange {
        series: String,
        axis: String,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// A page within a book series.
///
/// # Invariants
///
/// - `numbers.len()` equals the series' specificity count
/// - Every bound number lies within its axis bounds
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use folio::core::identity::PageIdentity;
/// use folio::core::series::{BookSeries, Fragment};
/// use folio::core::types::{AxisName, SeriesName, Specificity};
///
/// let page = AxisName::new("page").unwrap();
/// let series = Arc::new(
///     BookSeries::new(
///         SeriesName::new("journal").unwrap(),
///         vec![Specificity::new(page.clone(), 1, 999).unwrap()],
///         vec![Fragment::axis(page.clone(), 3)],
///     )
///     .unwrap(),
/// );
///
/// let identity = PageIdentity::new(series.clone(), vec![Some(7)])
///     .unwrap()
///     .with_property("title", "draft");
/// assert_eq!(identity.number(&page), Some(7));
///
/// assert!(PageIdentity::new(series, vec![Some(7), Some(1)]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PageIdentity {
    series: Arc<BookSeries>,
    numbers: Vec<Option<u32>>,
    properties: BTreeMap<String, PropertyValue>,
}

impl PageIdentity {
    /// Bind a number vector to a series.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::LengthMismatch` if the vector length differs
    /// from the series' specificity count, or `IdentityError::OutOfRange` if
    /// a bound number falls outside its axis bounds.
    pub fn new(series: Arc<BookSeries>, numbers: Vec<Option<u32>>) -> Result<Self, IdentityError> {
        let specs = series.specificities();
        if numbers.len() != specs.len() {
            return Err(IdentityError::LengthMismatch {
                series: series.name().to_string(),
                expected: specs.len(),
                actual: numbers.len(),
            });
        }

        for (spec, number) in specs.iter().zip(&numbers) {
            if let Some(value) = *number {
                if !spec.contains(value) {
                    return Err(IdentityError::OutOfRange {
                        series: series.name().to_string(),
                        axis: spec.axis().to_string(),
                        value,
                        min: spec.min(),
                        max: spec.max(),
                    });
                }
            }
        }

        Ok(Self {
            series,
            numbers,
            properties: BTreeMap::new(),
        })
    }

    /// Bind a fully specified number vector.
    pub fn complete(series: Arc<BookSeries>, numbers: &[u32]) -> Result<Self, IdentityError> {
        Self::new(series, numbers.iter().copied().map(Some).collect())
    }

    /// Add a property, consuming and returning the identity.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Set a property, replacing any previous value.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    pub fn series(&self) -> &Arc<BookSeries> {
        &self.series
    }

    pub fn numbers(&self) -> &[Option<u32>] {
        &self.numbers
    }

    /// Value bound at `position`, if any.
    pub fn number_at(&self, position: usize) -> Option<u32> {
        self.numbers.get(position).copied().flatten()
    }

    /// Value bound for the named axis, if any.
    pub fn number(&self, axis: &AxisName) -> Option<u32> {
        self.series
            .axis_position(axis)
            .and_then(|pos| self.number_at(pos))
    }

    /// Whether every position has a value.
    pub fn is_complete(&self) -> bool {
        self.numbers.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::Fragment;
    use crate::core::types::{SeriesName, Specificity};

    fn atlas() -> Arc<BookSeries> {
        let plate = AxisName::new("plate").unwrap();
        let sheet = AxisName::new("sheet").unwrap();
        Arc::new(
            BookSeries::new(
                SeriesName::new("atlas").unwrap(),
                vec![
                    Specificity::new(plate.clone(), 1, 99).unwrap(),
                    Specificity::new(sheet.clone(), 1, 4).unwrap(),
                ],
                vec![Fragment::axis(plate, 2), Fragment::letters(sheet)],
            )
            .unwrap(),
        )
    }

    #[test]
    fn length_must_match() {
        let err = PageIdentity::new(atlas(), vec![Some(1)]).unwrap_err();
        assert_eq!(
            err,
            IdentityError::LengthMismatch {
                series: "atlas".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn out_of_range_rejected() {
        let err = PageIdentity::complete(atlas(), &[12, 5]).unwrap_err();
        assert!(matches!(err, IdentityError::OutOfRange { value: 5, .. }));
    }

    #[test]
    fn unbound_positions_allowed() {
        let identity = PageIdentity::new(atlas(), vec![Some(12), None]).unwrap();
        assert!(!identity.is_complete());
        assert_eq!(identity.number_at(0), Some(12));
        assert_eq!(identity.number_at(1), None);
        assert_eq!(identity.number_at(7), None);
    }

    #[test]
    fn number_by_axis() {
        let identity = PageIdentity::complete(atlas(), &[12, 3]).unwrap();
        assert!(identity.is_complete());
        assert_eq!(identity.number(&AxisName::new("sheet").unwrap()), Some(3));
        assert_eq!(identity.number(&AxisName::new("other").unwrap()), None);
    }

    #[test]
    fn properties_replace() {
        let mut identity = PageIdentity::complete(atlas(), &[1, 1])
            .unwrap()
            .with_property("title", "first");
        identity.set_property("title", "second");
        identity.set_property("year", 1998i64);

        assert_eq!(identity.property("title"), Some(&PropertyValue::text("second")));
        assert_eq!(identity.property("year"), Some(&PropertyValue::Number(1998)));
        assert_eq!(identity.properties().len(), 2);
    }
}
