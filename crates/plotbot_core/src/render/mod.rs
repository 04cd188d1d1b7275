//! Chart rendering.
//!
//! # Responsibility
//! - Turn a chart's effective points into raster image buffers.
//! - Keep all drawing-backend details behind this module boundary.
//!
//! # Invariants
//! - Rendering never mutates chart state; it draws the folded point list.
//! - Renders of an empty chart fail instead of producing a blank image.

pub mod color;
mod heatmap;
pub(crate) mod planar;
mod radar;

use crate::model::chart::{Chart, ChartShape};
use image::ImageEncoder;
use log::info;
use plotters::chart::ChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::BitMapBackend;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub use radar::RADAR_ANIMATION_PATH;

/// Raster output dimensions for every chart shape.
pub const PLOT_WIDTH: u32 = 800;
pub const PLOT_HEIGHT: u32 = 600;

pub type RenderResult<T> = Result<T, RenderError>;

pub(crate) type PlanarContext<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Rendering-layer error for draw, encode and animation I/O failures.
#[derive(Debug)]
pub enum RenderError {
    /// Nothing to draw: no stored points and no contributions.
    EmptyChart,
    /// Animated rendering requested for a non-radar chart.
    AnimationUnsupported,
    /// Drawing backend failure, flattened to text.
    Backend(String),
    /// Raster encoding failure.
    Encode(String),
    /// Animation file I/O failure.
    Io(std::io::Error),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyChart => write!(f, "nothing plotted on this chart yet"),
            Self::AnimationUnsupported => {
                write!(f, "animated rendering is only available for radar charts")
            }
            Self::Backend(message) => write!(f, "drawing failed: {message}"),
            Self::Encode(message) => write!(f, "image encoding failed: {message}"),
            Self::Io(err) => write!(f, "animation file error: {err}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

pub(crate) fn backend_err<E: Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}

/// Zoom window applied on top of the chart's own extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomWindow {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Render settings shared by every chart shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Annotate each point with its label.
    pub show_labels: bool,
    /// Overlay the distance-from-centroid heatmap (planar shapes).
    pub contour: bool,
    /// Optional zoom window (planar shapes).
    pub zoom: Option<ZoomWindow>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_labels: true,
            contour: false,
            zoom: None,
        }
    }
}

/// Renders a chart to an in-memory PNG buffer.
///
/// Crowdsource contributions are folded into the drawn point list; stored
/// points are left untouched.
///
/// # Errors
/// - [`RenderError::EmptyChart`] when the folded point list is empty.
/// - Backend and encoding failures flattened to text.
pub fn render_chart(chart: &Chart, options: &RenderOptions) -> RenderResult<Vec<u8>> {
    let points = chart.effective_points();
    if points.is_empty() {
        return Err(RenderError::EmptyChart);
    }

    let buffer = match chart.shape() {
        ChartShape::Radar { axes } => radar::render_static(chart, axes, &points, options)?,
        _ => planar::render(chart, &points, options)?,
    };

    info!(
        "event=render module=render status=ok shape={} points={} bytes={}",
        chart.shape().name(),
        points.len(),
        buffer.len()
    );
    Ok(buffer)
}

/// Renders a radar chart as an animated GIF, one frame per point.
///
/// The GIF is written to [`RADAR_ANIMATION_PATH`] on local disk and read
/// back into the returned buffer; the transport layer streams it from
/// there.
pub fn render_animated(chart: &Chart) -> RenderResult<Vec<u8>> {
    render_animated_to(chart, Path::new(RADAR_ANIMATION_PATH))
}

/// Same as [`render_animated`], with a caller-chosen output path.
pub fn render_animated_to(chart: &Chart, path: &Path) -> RenderResult<Vec<u8>> {
    let buffer = radar::render_animated_to(chart, path)?;
    info!(
        "event=render_animated module=render status=ok shape=radar points={} bytes={}",
        chart.point_count(),
        buffer.len()
    );
    Ok(buffer)
}

/// Encodes a raw RGB frame into a PNG byte buffer.
pub(crate) fn encode_png(raw: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png)
        .write_image(raw, width, height, image::ColorType::Rgb8)
        .map_err(|err| RenderError::Encode(err.to_string()))?;
    Ok(png)
}
