//! Isoline extraction parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for isoline extraction.
///
/// The field range `[0, max]` is cut into `level_count` equal bands and
/// one isoline is drawn on each interior band boundary, so the default of
/// 20 yields 19 isolines.
///
/// # Example
///
/// ```
/// use mesh_isoline::IsolineParams;
///
/// let params = IsolineParams::default().with_level_count(10);
/// assert_eq!(params.interior_levels().count(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IsolineParams {
    /// Number of bands the field range is divided into.
    pub level_count: u32,
}

impl Default for IsolineParams {
    fn default() -> Self {
        Self { level_count: 20 }
    }
}

impl IsolineParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Few, widely spaced lines.
    #[must_use]
    pub const fn coarse() -> Self {
        Self { level_count: 8 }
    }

    /// Dense lines for close inspection.
    #[must_use]
    pub const fn fine() -> Self {
        Self { level_count: 50 }
    }

    /// Set the level count.
    #[must_use]
    pub const fn with_level_count(mut self, level_count: u32) -> Self {
        self.level_count = level_count;
        self
    }

    /// Indices of the levels that get an isoline, `1..level_count`.
    pub fn interior_levels(&self) -> impl Iterator<Item = u32> {
        1..self.level_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(IsolineParams::new().level_count, 20);
        assert!(IsolineParams::coarse().level_count < IsolineParams::fine().level_count);
        assert_eq!(IsolineParams::default().interior_levels().count(), 19);
    }

    #[test]
    fn degenerate_counts_have_no_levels() {
        assert_eq!(IsolineParams::new().with_level_count(1).interior_levels().count(), 0);
        assert_eq!(IsolineParams::new().with_level_count(0).interior_levels().count(), 0);
    }
}
