//! Inclusive age ranges used for demographic bucketing.

/// An inclusive `[min, max]` range of ages in completed years.
///
/// # Examples
///
/// ```
/// use aihd_types::AgeRange;
///
/// let band = AgeRange::new(6, 18);
/// assert!(band.contains(6));
/// assert!(band.contains(18));
/// assert!(!band.contains(19));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgeRange {
    /// Lowest age included.
    pub min: u32,
    /// Highest age included.
    pub max: u32,
}

impl AgeRange {
    /// Creates a range.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Returns true if `age` lies within the range, both ends included.
    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }
}
