//! Coordinate system for a panel
//!
//! Panels are always cartesian; a coord only carries optional fixed axis
//! limits. Without limits, writers fit the axes to the data.

use serde::{Deserialize, Serialize};

/// Cartesian coordinate system with optional fixed limits
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord {
    /// Fixed x-axis range (min, max)
    pub xlim: Option<(f64, f64)>,
    /// Fixed y-axis range (min, max)
    pub ylim: Option<(f64, f64)>,
}

impl Coord {
    /// Create a coord with no fixed limits
    pub fn cartesian() -> Self {
        Self::default()
    }

    /// Fix the x-axis range. Reversed limits are swapped.
    pub fn with_xlim(mut self, min: f64, max: f64) -> Self {
        self.xlim = Some(ordered(min, max));
        self
    }

    /// Fix the y-axis range. Reversed limits are swapped.
    pub fn with_ylim(mut self, min: f64, max: f64) -> Self {
        self.ylim = Some(ordered(min, max));
        self
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cartesian_has_no_limits() {
        let coord = Coord::cartesian();
        assert_eq!(coord.xlim, None);
        assert_eq!(coord.ylim, None);
    }

    #[test]
    fn test_reversed_limits_auto_swap() {
        let coord = Coord::cartesian().with_xlim(4.0, -3.0).with_ylim(-2.0, 4.0);
        assert_eq!(coord.xlim, Some((-3.0, 4.0)));
        assert_eq!(coord.ylim, Some((-2.0, 4.0)));
    }
}
