//! Contract ceiling values.

use serde::{Deserialize, Serialize};

/// An inclusive dollar interval.
///
/// Used both for record ceilings (after normalization) and for the ceiling
/// constraint of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CeilingRange {
    /// Lower bound (inclusive).
    pub min: i64,
    /// Upper bound (inclusive).
    pub max: i64,
}

impl CeilingRange {
    /// Creates a new range.
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Returns true if `min <= max`.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// Inclusive interval overlap test.
    ///
    /// Two ranges overlap when `self.min <= other.max && self.max >= other.min`,
    /// so touching endpoints count as overlap.
    ///
    /// # Example
    ///
    /// ```
    /// use gsa_model::CeilingRange;
    ///
    /// let filter = CeilingRange::new(50, 100);
    /// assert!(CeilingRange::new(0, 60).overlaps(&filter));
    /// assert!(CeilingRange::new(100, 100).overlaps(&filter));
    /// assert!(!CeilingRange::new(0, 40).overlaps(&filter));
    /// ```
    pub fn overlaps(&self, other: &CeilingRange) -> bool {
        self.min <= other.max && self.max >= other.min
    }
}

/// The ceiling of an opportunity: either a single figure or a range.
///
/// In the dataset this is a bare number or a `{"min": .., "max": ..}` object.
/// Consumers should compare ceilings through [`Ceiling::bounds`], never by
/// inspecting the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ceiling {
    /// A single dollar figure.
    Single(i64),
    /// A dollar range.
    Range(CeilingRange),
}

impl Ceiling {
    /// Normalizes the ceiling to an interval.
    ///
    /// A single figure becomes the degenerate range `[value, value]`.
    pub fn bounds(&self) -> CeilingRange {
        match *self {
            Ceiling::Single(value) => CeilingRange::new(value, value),
            Ceiling::Range(range) => range,
        }
    }

    /// Lower bound of the normalized ceiling.
    pub fn min(&self) -> i64 {
        self.bounds().min
    }

    /// Upper bound of the normalized ceiling.
    pub fn max(&self) -> i64 {
        self.bounds().max
    }
}
