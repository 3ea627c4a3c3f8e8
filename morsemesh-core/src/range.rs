//! Closed value ranges and linear rescaling between them

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A closed interval `[min, max]` used as a rescale source or target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Create a new range
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The unit interval `[0, 1]`
    pub const fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// The index range `[0, extent - 1]` of a grid axis
    pub fn grid_axis(extent: usize) -> Self {
        Self::new(0.0, extent.saturating_sub(1) as f64)
    }

    /// Signed length of the range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check that both bounds are finite
    pub fn validate(&self) -> Result<()> {
        if self.min.is_finite() && self.max.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidRange {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Linearly map `value` from this range onto `target`.
    ///
    /// A zero-width source range maps everything onto `target.min`.
    pub fn rescale_to(&self, value: f64, target: &ValueRange) -> f64 {
        let span = self.span();
        if span == 0.0 {
            return target.min;
        }
        let normalized = (value - self.min) / span;
        normalized * target.span() + target.min
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::unit()
    }
}

impl From<(f64, f64)> for ValueRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rescale_grid_axis() {
        let source = ValueRange::grid_axis(5);
        let target = ValueRange::new(-1.0, 1.0);

        assert_relative_eq!(source.rescale_to(0.0, &target), -1.0);
        assert_relative_eq!(source.rescale_to(2.0, &target), 0.0);
        assert_relative_eq!(source.rescale_to(4.0, &target), 1.0);
    }

    #[test]
    fn test_rescale_fractional_position() {
        let source = ValueRange::grid_axis(4);
        let target = ValueRange::new(0.0, 300.0);

        assert_relative_eq!(source.rescale_to(1.5, &target), 150.0);
    }

    #[test]
    fn test_degenerate_axis_maps_to_min() {
        let source = ValueRange::grid_axis(1);
        let target = ValueRange::new(3.0, 7.0);

        assert_relative_eq!(source.rescale_to(0.0, &target), 3.0);
    }

    #[test]
    fn test_reversed_target() {
        let source = ValueRange::grid_axis(3);
        let target = ValueRange::new(10.0, 0.0);

        assert_relative_eq!(source.rescale_to(0.0, &target), 10.0);
        assert_relative_eq!(source.rescale_to(2.0, &target), 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(ValueRange::new(0.0, 1.0).validate().is_ok());
        assert!(matches!(
            ValueRange::new(f64::NAN, 1.0).validate(),
            Err(Error::InvalidRange { .. })
        ));
        assert!(ValueRange::new(0.0, f64::INFINITY).validate().is_err());
    }
}
