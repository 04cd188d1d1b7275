//! Radar chart rendering.
//!
//! # Responsibility
//! - Draw the polar grid, axis spokes and per-point polygons.
//! - Provide the animated multi-frame mode, one frame per point.
//!
//! # Invariants
//! - Axis captions and values share the same angle: axis `i` sits
//!   clockwise from the top at `i / count` of a full turn.

use crate::model::bounds::RADAR_MAX;
use crate::model::chart::{Chart, ChartShape};
use crate::model::point::{Coordinate, Point};
use crate::render::color::label_color;
use crate::render::{
    backend_err, encode_png, PlanarContext, RenderError, RenderOptions, RenderResult,
    PLOT_HEIGHT, PLOT_WIDTH,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

/// Fixed local-disk path the animated GIF is written to before streaming.
pub const RADAR_ANIMATION_PATH: &str = "radar_animation.gif";

const FRAME_DELAY_MS: u32 = 1_000;
const RING_COUNT: usize = 5;
const RING_SAMPLES: usize = 120;
/// Coordinate half-extent; leaves room for captions outside the unit circle.
const UNIT_EXTENT: f64 = 1.3;

fn axis_angle(index: usize, count: usize) -> f64 {
    FRAC_PI_2 - TAU * index as f64 / count as f64
}

fn polar_xy(angle: f64, value: f64) -> (f64, f64) {
    let radius = value / RADAR_MAX;
    (radius * angle.cos(), radius * angle.sin())
}

pub(crate) fn render_static(
    chart: &Chart,
    axes: &[String],
    points: &[Point],
    options: &RenderOptions,
) -> RenderResult<Vec<u8>> {
    let mut raw = vec![0u8; (PLOT_WIDTH * PLOT_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (PLOT_WIDTH, PLOT_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(backend_err)?;
        let mut ctx = draw_base(&root, chart, axes)?;

        for point in points {
            if let Coordinate::Radial(values) = &point.coordinate {
                draw_point(&mut ctx, &point.label, values, axes.len(), options.show_labels)?;
            }
        }

        if options.show_labels {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .border_style(BLACK)
                .background_style(WHITE.mix(0.85))
                .label_font(("sans-serif", 12))
                .draw()
                .map_err(backend_err)?;
        }
        root.present().map_err(backend_err)?;
    }
    encode_png(&raw, PLOT_WIDTH, PLOT_HEIGHT)
}

pub(crate) fn render_animated_to(chart: &Chart, path: &Path) -> RenderResult<Vec<u8>> {
    let ChartShape::Radar { axes } = chart.shape() else {
        return Err(RenderError::AnimationUnsupported);
    };
    let points = chart.effective_points();
    if points.is_empty() {
        return Err(RenderError::EmptyChart);
    }

    {
        let root = BitMapBackend::gif(path, (PLOT_WIDTH, PLOT_HEIGHT), FRAME_DELAY_MS)
            .map_err(backend_err)?
            .into_drawing_area();

        for point in &points {
            let Coordinate::Radial(values) = &point.coordinate else {
                continue;
            };
            root.fill(&WHITE).map_err(backend_err)?;
            let mut ctx = draw_base(&root, chart, axes)?;
            draw_point(&mut ctx, &point.label, values, axes.len(), false)?;

            let swatch_left = PLOT_WIDTH as i32 - 160;
            let swatch_top = PLOT_HEIGHT as i32 - 32;
            root.draw(&Rectangle::new(
                [(swatch_left, swatch_top), (swatch_left + 14, swatch_top + 14)],
                label_color(&point.label).filled(),
            ))
            .map_err(backend_err)?;
            root.draw(&Text::new(
                point.label.clone(),
                (swatch_left + 20, swatch_top + 1),
                ("sans-serif", 13),
            ))
            .map_err(backend_err)?;

            root.present().map_err(backend_err)?;
        }
    }

    Ok(std::fs::read(path)?)
}

fn draw_base<'a, 'b>(
    root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    chart: &Chart,
    axes: &[String],
) -> RenderResult<PlanarContext<'a, 'b>> {
    let mut builder = ChartBuilder::on(root);
    builder.margin(12);
    if let Some(title) = chart.title() {
        builder.caption(title, ("sans-serif", 28));
    }
    let mut ctx = builder
        .build_cartesian_2d(-UNIT_EXTENT..UNIT_EXTENT, -UNIT_EXTENT..UNIT_EXTENT)
        .map_err(backend_err)?;

    let grid_line = RGBColor(200, 200, 200);
    for ring in 1..=RING_COUNT {
        let value = ring as f64 * RADAR_MAX / RING_COUNT as f64;
        let circle: Vec<(f64, f64)> = (0..=RING_SAMPLES)
            .map(|sample| {
                let angle = TAU * sample as f64 / RING_SAMPLES as f64;
                polar_xy(angle, value)
            })
            .collect();
        ctx.draw_series(std::iter::once(PathElement::new(
            circle,
            grid_line.stroke_width(1),
        )))
        .map_err(backend_err)?;
    }

    let count = axes.len();
    let caption_style = TextStyle::from(("sans-serif", 14).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    for (index, caption) in axes.iter().enumerate() {
        let angle = axis_angle(index, count);
        ctx.draw_series(LineSeries::new(
            vec![(0.0, 0.0), polar_xy(angle, RADAR_MAX)],
            &grid_line,
        ))
        .map_err(backend_err)?;
        ctx.draw_series(std::iter::once(Text::new(
            caption.clone(),
            polar_xy(angle, RADAR_MAX * 1.15),
            caption_style.clone(),
        )))
        .map_err(backend_err)?;
    }

    let tick_color = BLACK.mix(0.5);
    let tick_style = TextStyle::from(("sans-serif", 10).into_font()).color(&tick_color);
    for ring in 1..=RING_COUNT {
        let value = ring as f64 * RADAR_MAX / RING_COUNT as f64;
        let (x, y) = polar_xy(FRAC_PI_2, value);
        ctx.draw_series(std::iter::once(Text::new(
            format!("{value:.0}"),
            (x + 0.03, y),
            tick_style.clone(),
        )))
        .map_err(backend_err)?;
    }

    root.draw(&Text::new(
        format!("ID: ({})", chart.id()),
        (8, 4),
        ("sans-serif", 11).into_font().color(&BLACK.mix(0.6)),
    ))
    .map_err(backend_err)?;

    Ok(ctx)
}

fn draw_point(
    ctx: &mut PlanarContext<'_, '_>,
    label: &str,
    values: &[f64],
    count: usize,
    with_legend: bool,
) -> RenderResult<()> {
    if values.is_empty() {
        return Ok(());
    }
    let color = label_color(label);
    let vertices: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| polar_xy(axis_angle(index, count), value))
        .collect();
    let mut outline = vertices.clone();
    outline.push(vertices[0]);

    ctx.draw_series(std::iter::once(Polygon::new(
        vertices.clone(),
        color.mix(0.25),
    )))
    .map_err(backend_err)?;
    let series = ctx
        .draw_series(std::iter::once(PathElement::new(
            outline,
            color.stroke_width(2),
        )))
        .map_err(backend_err)?;
    if with_legend {
        series.label(label).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
        });
    }
    ctx.draw_series(
        vertices
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
    )
    .map_err(backend_err)?;

    Ok(())
}
