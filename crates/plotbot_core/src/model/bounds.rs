//! Bounds predicates for chart shapes.
//!
//! # Responsibility
//! - Provide the rectangular, triangular and radar-range predicates used
//!   to validate points before they enter a chart.
//!
//! # Invariants
//! - Predicates are pure; they never consult chart state.
//! - Edge coordinates count as inside.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Half-extent of the fixed square used by boxed and alignment charts.
pub const GRID_EXTENT: f64 = 10.0;

/// Fixed bounds for boxed and alignment charts.
pub const GRID_BOUNDS: AxisBounds = AxisBounds {
    min_x: Some(-GRID_EXTENT),
    max_x: Some(GRID_EXTENT),
    min_y: Some(-GRID_EXTENT),
    max_y: Some(GRID_EXTENT),
};

/// Base width and height of the fixed triangle chart. Vertices are
/// `(0, 0)`, `(TRIANGLE_SIZE / 2, TRIANGLE_SIZE)` and `(TRIANGLE_SIZE, 0)`.
pub const TRIANGLE_SIZE: f64 = 10.0;

/// Enclosing rectangle of the triangle chart, used for render extents.
pub const TRIANGLE_BOUNDS: AxisBounds = AxisBounds {
    min_x: Some(0.0),
    max_x: Some(TRIANGLE_SIZE),
    min_y: Some(0.0),
    max_y: Some(TRIANGLE_SIZE),
};

/// Inclusive value range for every radar axis.
pub const RADAR_MIN: f64 = 0.0;
/// Inclusive value range for every radar axis.
pub const RADAR_MAX: f64 = 10.0;

/// Rectangular bounds with independently optional sides.
///
/// `None` means unbounded on that side; display renders it as `_`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
}

impl AxisBounds {
    /// Bounds closed on all four sides.
    pub fn closed(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x: Some(min_x),
            max_x: Some(max_x),
            min_y: Some(min_y),
            max_y: Some(max_y),
        }
    }

    /// Tests whether `(x, y)` violates no declared side.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        !(self.min_x.is_some_and(|min| x < min)
            || self.max_x.is_some_and(|max| x > max)
            || self.min_y.is_some_and(|min| y < min)
            || self.max_y.is_some_and(|max| y > max))
    }

    /// Declared x range, falling back to `fallback` on open sides.
    pub fn x_range_or(&self, fallback: (f64, f64)) -> (f64, f64) {
        (
            self.min_x.unwrap_or(fallback.0),
            self.max_x.unwrap_or(fallback.1),
        )
    }

    /// Declared y range, falling back to `fallback` on open sides.
    pub fn y_range_or(&self, fallback: (f64, f64)) -> (f64, f64) {
        (
            self.min_y.unwrap_or(fallback.0),
            self.max_y.unwrap_or(fallback.1),
        )
    }
}

impl Display for AxisBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn side(value: Option<f64>) -> String {
            value.map_or_else(|| "_".to_string(), |v| v.to_string())
        }

        write!(
            f,
            "x : [{}, {}] y : [{}, {}]",
            side(self.min_x),
            side(self.max_x),
            side(self.min_y),
            side(self.max_y)
        )
    }
}

/// Signed area test: which side of the directed edge `(x2, y2) -> (x3, y3)`
/// the point `(x1, y1)` falls on.
fn edge_sign(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> f64 {
    (x1 - x3) * (y2 - y3) - (x2 - x3) * (y1 - y3)
}

/// Point-in-triangle test against the fixed triangle chart vertices.
///
/// Mixed edge signs mean the point is outside; zero signs (on an edge)
/// count as inside.
pub fn triangle_contains(x: f64, y: f64) -> bool {
    let apex_x = TRIANGLE_SIZE / 2.0;
    let d1 = edge_sign(x, y, 0.0, 0.0, apex_x, TRIANGLE_SIZE);
    let d2 = edge_sign(x, y, apex_x, TRIANGLE_SIZE, TRIANGLE_SIZE, 0.0);
    let d3 = edge_sign(x, y, TRIANGLE_SIZE, 0.0, 0.0, 0.0);

    let any_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let any_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(any_negative && any_positive)
}

/// Tests one radar axis value against the fixed `[0, 10]` range.
pub fn radar_value_in_range(value: f64) -> bool {
    (RADAR_MIN..=RADAR_MAX).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::{radar_value_in_range, triangle_contains, AxisBounds};

    #[test]
    fn contains_respects_each_declared_side() {
        let bounds = AxisBounds::closed(-10.0, 10.0, -10.0, 10.0);

        assert!(bounds.contains(0.0, 0.0));
        assert!(bounds.contains(-10.0, 10.0));
        assert!(!bounds.contains(10.1, 0.0));
        assert!(!bounds.contains(0.0, -10.1));
    }

    #[test]
    fn open_sides_are_unbounded() {
        let bounds = AxisBounds {
            max_y: Some(5.0),
            ..AxisBounds::default()
        };

        assert!(bounds.contains(1e9, -1e9));
        assert!(!bounds.contains(0.0, 5.1));
    }

    #[test]
    fn display_marks_open_sides_with_underscore() {
        let bounds = AxisBounds {
            min_x: Some(-10.0),
            max_x: Some(10.0),
            ..AxisBounds::default()
        };

        assert_eq!(bounds.to_string(), "x : [-10, 10] y : [_, _]");
    }

    #[test]
    fn triangle_accepts_interior_and_edges() {
        assert!(triangle_contains(5.0, 5.0));
        assert!(triangle_contains(0.0, 0.0));
        assert!(triangle_contains(5.0, 10.0));
        assert!(triangle_contains(2.5, 5.0));
    }

    #[test]
    fn triangle_rejects_exterior() {
        assert!(!triangle_contains(9.0, 9.0));
        assert!(!triangle_contains(-0.1, 0.0));
        assert!(!triangle_contains(5.0, 10.1));
    }

    #[test]
    fn radar_range_is_inclusive() {
        assert!(radar_value_in_range(0.0));
        assert!(radar_value_in_range(10.0));
        assert!(!radar_value_in_range(-0.1));
        assert!(!radar_value_in_range(10.1));
    }
}
