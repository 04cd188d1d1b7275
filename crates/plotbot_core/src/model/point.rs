//! Labeled point model.
//!
//! # Responsibility
//! - Define the canonical labeled point shared by every chart shape.
//! - Keep planar and radial coordinates behind one coordinate type.
//!
//! # Invariants
//! - `label` is unique within a chart's point store.
//! - Radial value vectors keep the caller's axis order.

use serde::{Deserialize, Serialize};

/// Planar coordinate with symmetric error margins per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub err_x: f64,
    #[serde(default)]
    pub err_y: f64,
}

impl PlanarPoint {
    /// Creates a point without error margins.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            err_x: 0.0,
            err_y: 0.0,
        }
    }

    /// Creates a point with symmetric error margins.
    pub fn with_error(x: f64, y: f64, err_x: f64, err_y: f64) -> Self {
        Self { x, y, err_x, err_y }
    }

    /// Error-expanded extremes, including the point itself.
    ///
    /// Every returned coordinate must satisfy the chart's bounds predicate
    /// for the point to be accepted.
    pub fn extremes(&self) -> [(f64, f64); 9] {
        let xs = [self.x - self.err_x, self.x, self.x + self.err_x];
        let ys = [self.y - self.err_y, self.y, self.y + self.err_y];
        let mut out = [(0.0, 0.0); 9];
        let mut slot = 0;
        for &x in &xs {
            for &y in &ys {
                out[slot] = (x, y);
                slot += 1;
            }
        }
        out
    }
}

/// Coordinate stored for one labeled point.
///
/// Planar shapes accept only `Planar`; radar charts accept only `Radial`
/// with one value per named axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coordinate {
    Planar(PlanarPoint),
    Radial(Vec<f64>),
}

impl Coordinate {
    /// Shorthand for a planar coordinate without error margins.
    pub fn planar(x: f64, y: f64) -> Self {
        Self::Planar(PlanarPoint::new(x, y))
    }

    /// Stable kind name used in mismatch diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Planar(_) => "planar",
            Self::Radial(_) => "radial",
        }
    }
}

/// One labeled point as surfaced to callers and renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub label: String,
    pub coordinate: Coordinate,
}

/// Canonical label form used to match crowdsource entries against stored
/// points: chat handles drop inner spaces when used as contribution keys.
pub fn normalize_label(label: &str) -> String {
    label.replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::{normalize_label, Coordinate, PlanarPoint};

    #[test]
    fn extremes_cover_error_box_corners() {
        let point = PlanarPoint::with_error(1.0, 2.0, 0.5, 1.0);
        let extremes = point.extremes();

        assert!(extremes.contains(&(0.5, 1.0)));
        assert!(extremes.contains(&(1.5, 3.0)));
        assert!(extremes.contains(&(0.5, 3.0)));
        assert!(extremes.contains(&(1.0, 2.0)));
    }

    #[test]
    fn extremes_collapse_without_margins() {
        let point = PlanarPoint::new(3.0, -4.0);
        assert!(point.extremes().iter().all(|&(x, y)| x == 3.0 && y == -4.0));
    }

    #[test]
    fn normalize_label_strips_spaces_only() {
        assert_eq!(normalize_label("John Smith"), "JohnSmith");
        assert_eq!(normalize_label("plain"), "plain");
    }

    #[test]
    fn coordinate_kind_names_are_stable() {
        assert_eq!(Coordinate::planar(0.0, 0.0).kind(), "planar");
        assert_eq!(Coordinate::Radial(vec![1.0]).kind(), "radial");
    }
}
