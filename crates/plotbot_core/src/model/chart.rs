//! Chart domain model.
//!
//! # Responsibility
//! - Hold one chart's shape, metadata, point store and crowdsource ledger.
//! - Enforce bounds and label-uniqueness invariants on every mutation.
//!
//! # Invariants
//! - `id` is stable and never reused for another chart.
//! - Every stored point, including its error margins, satisfies the
//!   shape's bounds predicate.
//! - Point labels are unique; overwrites keep the original position.
//! - Contributions exist only for labels with recorded consent at the
//!   time of contribution.

use crate::model::bounds::{self, AxisBounds, GRID_BOUNDS, TRIANGLE_BOUNDS};
use crate::model::ledger::{ConsentChange, CrowdsourceLedger};
use crate::model::point::{normalize_label, Coordinate, Point};
use crate::model::UserId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every chart.
pub type ChartId = Uuid;

pub type ChartResult<T> = Result<T, ChartError>;

/// Chart creator identity as known to the embedding chat layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub username: String,
    pub user_id: UserId,
}

/// Shape-specific axis metadata and bounds behavior.
///
/// One chart core serves five display variants; everything that differs
/// between them lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "shape")]
pub enum ChartShape {
    /// Free 2-axis scatter with optionally open rectangular bounds.
    Axis {
        x_left: Option<String>,
        x_right: Option<String>,
        y_bottom: Option<String>,
        y_top: Option<String>,
        bounds: AxisBounds,
    },
    /// 3x3 grid over the fixed square, captioned per row and column.
    Boxed {
        horizontal: [String; 3],
        vertical: [String; 3],
    },
    /// 3x3 alignment grid with nine fixed cell captions, row-major from
    /// the top-left cell.
    Alignment { cells: [String; 9] },
    /// Points constrained to the fixed triangle.
    Triangle {
        x_left: Option<String>,
        x_right: Option<String>,
        y_top: Option<String>,
    },
    /// N named axes, each value in the fixed radar range.
    Radar { axes: Vec<String> },
}

impl ChartShape {
    /// Rectangular render extent, `None` for radar charts.
    pub fn axis_bounds(&self) -> Option<AxisBounds> {
        match self {
            Self::Axis { bounds, .. } => Some(*bounds),
            Self::Boxed { .. } | Self::Alignment { .. } => Some(GRID_BOUNDS),
            Self::Triangle { .. } => Some(TRIANGLE_BOUNDS),
            Self::Radar { .. } => None,
        }
    }

    /// Radar axis captions, when this is a radar shape.
    pub fn radar_axes(&self) -> Option<&[String]> {
        match self {
            Self::Radar { axes } => Some(axes),
            _ => None,
        }
    }

    fn planar_contains(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Axis { bounds, .. } => bounds.contains(x, y),
            Self::Boxed { .. } | Self::Alignment { .. } => GRID_BOUNDS.contains(x, y),
            Self::Triangle { .. } => bounds::triangle_contains(x, y),
            Self::Radar { .. } => false,
        }
    }

    /// Stable shape name used in diagnostics and log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Axis { .. } => "axis",
            Self::Boxed { .. } => "boxed",
            Self::Alignment { .. } => "alignment",
            Self::Triangle { .. } => "triangle",
            Self::Radar { .. } => "radar",
        }
    }
}

/// Which bounds predicate a rejected coordinate violated.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundsViolation {
    Rect(AxisBounds),
    Triangle,
    RadarRange,
}

/// Validation error for chart mutations and queries.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Point or one of its error extremes violates the shape bounds.
    OutOfBounds(BoundsViolation),
    /// No point stored under the given label.
    UnknownLabel(String),
    /// Radial value count differs from the chart's axis count.
    AxisCountMismatch { expected: usize, actual: usize },
    /// Coordinate kind does not fit the chart shape.
    CoordinateKind { expected: &'static str },
    /// Nobody has consented to crowdsourcing for the label.
    ConsentMissing(String),
    /// The exact consent pair was never recorded.
    ConsentNotGranted { user_id: UserId, label: String },
    /// The label has no contribution table at all.
    NoContributions(String),
    /// The label has contributions, but none from this user.
    ContributionMissing { user_id: UserId, label: String },
    /// A bounds edit would leave an existing point outside.
    PointOutsideNewBounds { label: String },
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds(BoundsViolation::Rect(bounds)) => {
                write!(f, "point and error cannot be out of bounds: {bounds}")
            }
            Self::OutOfBounds(BoundsViolation::Triangle) => {
                write!(f, "point and error cannot be out of triangle bounds")
            }
            Self::OutOfBounds(BoundsViolation::RadarRange) => {
                write!(
                    f,
                    "all values must be within the bounds [{}, {}]",
                    bounds::RADAR_MIN,
                    bounds::RADAR_MAX
                )
            }
            Self::UnknownLabel(label) => write!(f, "point not found: `{label}`"),
            Self::AxisCountMismatch { expected, actual } => write!(
                f,
                "value count does not match radar axes: expected {expected}, got {actual}"
            ),
            Self::CoordinateKind { expected } => {
                write!(f, "coordinate kind does not fit this chart: expected {expected}")
            }
            Self::ConsentMissing(label) => write!(
                f,
                "`{label}` has not consented to being crowdsource plotted"
            ),
            Self::ConsentNotGranted { user_id, label } => write!(
                f,
                "no consent recorded for `{label}` by user {user_id}"
            ),
            Self::NoContributions(label) => {
                write!(f, "no crowdsource contributions recorded for `{label}`")
            }
            Self::ContributionMissing { user_id, label } => write!(
                f,
                "user {user_id} has no crowdsource contribution for `{label}`"
            ),
            Self::PointOutsideNewBounds { label } => write!(
                f,
                "cannot change bounds: point `{label}` would fall outside"
            ),
        }
    }
}

impl Error for ChartError {}

/// Optional-field metadata patch applied through [`Chart::apply_edit`].
///
/// Fields irrelevant to the chart's shape are ignored, matching how the
/// chat layer sends one edit form for every variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartEdit {
    pub title: Option<String>,
    pub x_left: Option<String>,
    pub x_right: Option<String>,
    pub y_bottom: Option<String>,
    pub y_top: Option<String>,
    pub horizontal: Option<[String; 3]>,
    pub vertical: Option<[String; 3]>,
    pub cells: Option<[String; 9]>,
    pub axes: Option<Vec<String>>,
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
    pub custom_points: Option<bool>,
}

/// One chart: shape parameters fixed at construction, points and
/// crowdsource state mutated over its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    id: ChartId,
    title: Option<String>,
    shape: ChartShape,
    created_by: Creator,
    custom_points: bool,
    /// Unix epoch milliseconds of the last caller-recorded mutation.
    last_modified: Option<i64>,
    points: IndexMap<String, Coordinate>,
    ledger: CrowdsourceLedger,
}

impl Chart {
    /// Creates a chart with a generated stable ID.
    pub fn new(shape: ChartShape, created_by: Creator) -> Self {
        Self::with_id(Uuid::new_v4(), shape, created_by)
    }

    /// Creates a chart with a caller-provided stable ID.
    ///
    /// Used by embedding layers where identity already exists externally.
    pub fn with_id(id: ChartId, shape: ChartShape, created_by: Creator) -> Self {
        Self {
            id,
            title: None,
            shape,
            created_by,
            custom_points: false,
            last_modified: None,
            points: IndexMap::new(),
            ledger: CrowdsourceLedger::default(),
        }
    }

    pub fn id(&self) -> ChartId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn shape(&self) -> &ChartShape {
        &self.shape
    }

    pub fn creator(&self) -> &Creator {
        &self.created_by
    }

    pub fn set_creator(&mut self, creator: Creator) {
        self.created_by = creator;
    }

    pub fn custom_points(&self) -> bool {
        self.custom_points
    }

    pub fn last_modified(&self) -> Option<i64> {
        self.last_modified
    }

    /// Records the caller's mutation timestamp (epoch milliseconds).
    pub fn set_last_modified(&mut self, epoch_ms: i64) {
        self.last_modified = Some(epoch_ms);
    }

    /// Insertion-ordered snapshot of the raw stored points.
    pub fn points(&self) -> Vec<Point> {
        self.points
            .iter()
            .map(|(label, coordinate)| Point {
                label: label.clone(),
                coordinate: coordinate.clone(),
            })
            .collect()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Validates and upserts one labeled point.
    ///
    /// # Contract
    /// - The coordinate and all its error-expanded extremes must satisfy
    ///   the shape's bounds predicate.
    /// - An existing label is overwritten in place; its position in the
    ///   point order is preserved.
    ///
    /// # Errors
    /// - [`ChartError::OutOfBounds`] carrying the current bounds.
    /// - [`ChartError::AxisCountMismatch`] / [`ChartError::CoordinateKind`]
    ///   for radar arity and kind mismatches.
    pub fn plot_point(
        &mut self,
        label: impl Into<String>,
        coordinate: Coordinate,
    ) -> ChartResult<()> {
        self.validate_coordinate(&coordinate)?;
        self.points.insert(label.into(), coordinate);
        Ok(())
    }

    /// Removes one point and purges its crowdsource contributions.
    ///
    /// Consent entries survive; only the contribution table is dropped.
    pub fn remove_point(&mut self, label: &str) -> ChartResult<()> {
        if self.points.shift_remove(label).is_none() {
            return Err(ChartError::UnknownLabel(label.to_string()));
        }
        self.ledger.purge_contributions(label);
        Ok(())
    }

    /// Returns the stored coordinate for `label`.
    pub fn lookup(&self, label: &str) -> ChartResult<&Coordinate> {
        self.points
            .get(label)
            .ok_or_else(|| ChartError::UnknownLabel(label.to_string()))
    }

    /// Toggles crowdsource consent for the exact `(user, label)` pair.
    pub fn grant_consent(
        &mut self,
        user_id: UserId,
        label: impl Into<String>,
    ) -> ConsentChange {
        self.ledger.toggle_consent(user_id, label)
    }

    /// Revokes a previously recorded consent pair.
    pub fn revoke_consent(&mut self, user_id: UserId, label: &str) -> ChartResult<()> {
        if self.ledger.revoke_consent(user_id, label) {
            Ok(())
        } else {
            Err(ChartError::ConsentNotGranted {
                user_id,
                label: label.to_string(),
            })
        }
    }

    /// Labels with recorded consent, in grant order.
    pub fn consented_labels(&self) -> Vec<&str> {
        self.ledger.consented_labels()
    }

    /// Records one contributor's coordinate for a consented label.
    ///
    /// # Contract
    /// - Consent must already be recorded for `label`.
    /// - The coordinate must satisfy the same validation as
    ///   [`Chart::plot_point`].
    /// - A contributor's repeated contribution overwrites the previous one.
    pub fn contribute(
        &mut self,
        contributor: UserId,
        label: impl Into<String>,
        coordinate: Coordinate,
    ) -> ChartResult<()> {
        let label = label.into();
        if !self.ledger.has_consent_for(&label) {
            return Err(ChartError::ConsentMissing(label));
        }
        self.validate_coordinate(&coordinate)?;
        self.ledger.record_contribution(contributor, label, coordinate);
        Ok(())
    }

    /// Removes one contributor's entry for `label`.
    pub fn remove_contribution(&mut self, contributor: UserId, label: &str) -> ChartResult<()> {
        let Some(table) = self.ledger.contribution_table(label) else {
            return Err(ChartError::NoContributions(label.to_string()));
        };
        if !table.contains_key(&contributor) {
            return Err(ChartError::ContributionMissing {
                user_id: contributor,
                label: label.to_string(),
            });
        }
        self.ledger.delete_contribution(contributor, label);
        Ok(())
    }

    /// Contributor -> coordinate view for `label`.
    pub fn contributions(&self, label: &str) -> ChartResult<&IndexMap<UserId, Coordinate>> {
        self.ledger
            .contribution_table(label)
            .filter(|table| !table.is_empty())
            .ok_or_else(|| ChartError::NoContributions(label.to_string()))
    }

    /// Derived point list with crowdsource contributions folded in.
    ///
    /// Does not mutate stored points; with no contributions the result is
    /// value-equal to [`Chart::points`].
    pub fn effective_points(&self) -> Vec<Point> {
        self.ledger.fold(&self.points)
    }

    /// Applies an optional-field metadata patch.
    ///
    /// # Contract
    /// - Bounds changes (axis shape only) re-validate every stored point
    ///   and fail without mutating when any would fall outside.
    /// - Radar axis captions can only be replaced by a same-length list.
    pub fn apply_edit(&mut self, edit: &ChartEdit) -> ChartResult<()> {
        if let ChartShape::Axis { bounds, .. } = &self.shape {
            let has_bounds_change = edit.min_x.is_some()
                || edit.max_x.is_some()
                || edit.min_y.is_some()
                || edit.max_y.is_some();
            if has_bounds_change {
                let candidate = AxisBounds {
                    min_x: edit.min_x.or(bounds.min_x),
                    max_x: edit.max_x.or(bounds.max_x),
                    min_y: edit.min_y.or(bounds.min_y),
                    max_y: edit.max_y.or(bounds.max_y),
                };
                self.check_points_within(&candidate)?;
                if let ChartShape::Axis { bounds, .. } = &mut self.shape {
                    *bounds = candidate;
                }
            }
        }

        if let Some(axes) = &edit.axes {
            if let ChartShape::Radar { axes: current } = &mut self.shape {
                if axes.len() != current.len() {
                    return Err(ChartError::AxisCountMismatch {
                        expected: current.len(),
                        actual: axes.len(),
                    });
                }
                *current = axes.clone();
            }
        }

        match &mut self.shape {
            ChartShape::Axis {
                x_left,
                x_right,
                y_bottom,
                y_top,
                ..
            } => {
                apply_caption(x_left, &edit.x_left);
                apply_caption(x_right, &edit.x_right);
                apply_caption(y_bottom, &edit.y_bottom);
                apply_caption(y_top, &edit.y_top);
            }
            ChartShape::Boxed {
                horizontal,
                vertical,
            } => {
                if let Some(captions) = &edit.horizontal {
                    *horizontal = captions.clone();
                }
                if let Some(captions) = &edit.vertical {
                    *vertical = captions.clone();
                }
            }
            ChartShape::Alignment { cells } => {
                if let Some(captions) = &edit.cells {
                    *cells = captions.clone();
                }
            }
            ChartShape::Triangle {
                x_left,
                x_right,
                y_top,
            } => {
                apply_caption(x_left, &edit.x_left);
                apply_caption(x_right, &edit.x_right);
                apply_caption(y_top, &edit.y_top);
            }
            ChartShape::Radar { .. } => {}
        }

        if let Some(title) = &edit.title {
            self.title = Some(title.clone());
        }
        if let Some(flag) = edit.custom_points {
            self.custom_points = flag;
        }

        Ok(())
    }

    fn check_points_within(&self, candidate: &AxisBounds) -> ChartResult<()> {
        for (label, coordinate) in &self.points {
            if let Coordinate::Planar(point) = coordinate {
                if !point
                    .extremes()
                    .iter()
                    .all(|&(x, y)| candidate.contains(x, y))
                {
                    return Err(ChartError::PointOutsideNewBounds {
                        label: label.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_coordinate(&self, coordinate: &Coordinate) -> ChartResult<()> {
        match (&self.shape, coordinate) {
            (ChartShape::Radar { axes }, Coordinate::Radial(values)) => {
                if values.len() != axes.len() {
                    return Err(ChartError::AxisCountMismatch {
                        expected: axes.len(),
                        actual: values.len(),
                    });
                }
                if values.iter().any(|v| !bounds::radar_value_in_range(*v)) {
                    return Err(ChartError::OutOfBounds(BoundsViolation::RadarRange));
                }
                Ok(())
            }
            (ChartShape::Radar { .. }, Coordinate::Planar(_)) => {
                Err(ChartError::CoordinateKind { expected: "radial" })
            }
            (_, Coordinate::Radial(_)) => Err(ChartError::CoordinateKind { expected: "planar" }),
            (shape, Coordinate::Planar(point)) => {
                if point
                    .extremes()
                    .iter()
                    .all(|&(x, y)| shape.planar_contains(x, y))
                {
                    Ok(())
                } else {
                    Err(ChartError::OutOfBounds(self.bounds_violation()))
                }
            }
        }
    }

    fn bounds_violation(&self) -> BoundsViolation {
        match &self.shape {
            ChartShape::Axis { bounds, .. } => BoundsViolation::Rect(*bounds),
            ChartShape::Boxed { .. } | ChartShape::Alignment { .. } => {
                BoundsViolation::Rect(GRID_BOUNDS)
            }
            ChartShape::Triangle { .. } => BoundsViolation::Triangle,
            ChartShape::Radar { .. } => BoundsViolation::RadarRange,
        }
    }
}

fn apply_caption(slot: &mut Option<String>, edit: &Option<String>) {
    if let Some(caption) = edit {
        *slot = Some(caption.clone());
    }
}

/// Labels that fold onto a stored point use the stored label's
/// space-stripped form; exposed for embedding layers that pre-normalize.
pub fn contribution_label(point_label: &str) -> String {
    normalize_label(point_label)
}
