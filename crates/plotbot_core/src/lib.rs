//! Core chart domain logic for plotbot.
//! This crate is the single source of truth for plotting invariants.

pub mod fit;
pub mod logging;
pub mod model;
pub mod render;

pub use fit::{full_equation, render_fit, FitError, FitResult, PolyFit};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::bounds::AxisBounds;
pub use model::chart::{
    Chart, ChartEdit, ChartError, ChartId, ChartResult, ChartShape, Creator,
};
pub use model::ledger::{ConsentChange, CrowdsourceLedger};
pub use model::point::{Coordinate, PlanarPoint, Point};
pub use model::UserId;
pub use render::{
    render_animated, render_animated_to, render_chart, RenderError, RenderOptions, RenderResult,
    ZoomWindow,
};

/// Minimal health-check API for embedding layers.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
