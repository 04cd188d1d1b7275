//! Scatter rendering for the planar chart shapes.
//!
//! # Responsibility
//! - Draw axis, boxed, alignment and triangle charts: guides, error bars,
//!   per-label colored scatter, annotations and the optional heatmap.
//!
//! # Invariants
//! - Draw order keeps points above guides and the heatmap below both.

use crate::model::bounds::GRID_EXTENT;
use crate::model::chart::{Chart, ChartShape};
use crate::model::point::{Coordinate, PlanarPoint, Point};
use crate::render::color::label_color;
use crate::render::{
    backend_err, encode_png, heatmap, PlanarContext, RenderError, RenderOptions, RenderResult,
    PLOT_HEIGHT, PLOT_WIDTH,
};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Vertical band reserved under each alignment row for cell captions.
const CAPTION_BAND: f64 = 1.0;

pub(crate) fn render(
    chart: &Chart,
    points: &[Point],
    options: &RenderOptions,
) -> RenderResult<Vec<u8>> {
    let planar: Vec<(String, PlanarPoint)> = points
        .iter()
        .filter_map(|point| match &point.coordinate {
            Coordinate::Planar(planar) => Some((point.label.clone(), *planar)),
            Coordinate::Radial(_) => None,
        })
        .collect();
    if planar.is_empty() {
        return Err(RenderError::EmptyChart);
    }

    let mut raw = vec![0u8; (PLOT_WIDTH * PLOT_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (PLOT_WIDTH, PLOT_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(backend_err)?;
        draw(chart, &planar, options, &root)?;
        root.present().map_err(backend_err)?;
    }
    encode_png(&raw, PLOT_WIDTH, PLOT_HEIGHT)
}

fn draw(
    chart: &Chart,
    planar: &[(String, PlanarPoint)],
    options: &RenderOptions,
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
) -> RenderResult<()> {
    let (x_min, x_max, y_min, y_max) = extent(chart, planar, options);
    let (x_caption, y_caption) = axis_captions(chart.shape(), chart.title());
    let caption = match chart.shape() {
        ChartShape::Triangle { y_top, .. } => y_top.clone(),
        _ => chart.title().map(str::to_string),
    };

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(48);
    if let Some(caption) = &caption {
        builder.caption(caption, ("sans-serif", 28));
    }
    let mut ctx = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(backend_err)?;

    let mut mesh = ctx.configure_mesh();
    if !matches!(chart.shape(), ChartShape::Axis { .. }) {
        mesh.disable_x_mesh().disable_y_mesh();
    }
    mesh.x_desc(x_caption)
        .y_desc(y_caption)
        .axis_desc_style(("sans-serif", 16))
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(backend_err)?;

    if options.contour {
        let xy: Vec<(f64, f64)> = planar.iter().map(|(_, p)| (p.x, p.y)).collect();
        let centroid = heatmap::draw_overlay(&mut ctx, &xy, (x_min, x_max, y_min, y_max))?;
        ctx.draw_series(std::iter::once(Circle::new(centroid, 4, BLACK.filled())))
            .map_err(backend_err)?;
    }

    draw_guides(&mut ctx, chart.shape(), (x_min, x_max, y_min, y_max))?;

    for (label, point) in planar {
        let color = label_color(label);
        if point.err_y > 0.0 {
            ctx.draw_series(std::iter::once(ErrorBar::new_vertical(
                point.x,
                point.y - point.err_y,
                point.y,
                point.y + point.err_y,
                color.stroke_width(1),
                6,
            )))
            .map_err(backend_err)?;
        }
        if point.err_x > 0.0 {
            ctx.draw_series(std::iter::once(ErrorBar::new_horizontal(
                point.y,
                point.x - point.err_x,
                point.x,
                point.x + point.err_x,
                color.stroke_width(1),
                6,
            )))
            .map_err(backend_err)?;
        }
        ctx.draw_series(std::iter::once(Circle::new(
            (point.x, point.y),
            4,
            color.filled(),
        )))
        .map_err(backend_err)?;
        if options.show_labels {
            ctx.draw_series(std::iter::once(Text::new(
                label.clone(),
                (point.x, point.y),
                ("sans-serif", 13),
            )))
            .map_err(backend_err)?;
        }
    }

    root.draw(&Text::new(
        format!("ID: ({})", chart.id()),
        (8, 4),
        ("sans-serif", 11).into_font().color(&BLACK.mix(0.6)),
    ))
    .map_err(backend_err)?;

    Ok(())
}

pub(crate) fn extent(
    chart: &Chart,
    planar: &[(String, PlanarPoint)],
    options: &RenderOptions,
) -> (f64, f64, f64, f64) {
    if let Some(zoom) = options.zoom {
        return (zoom.min_x, zoom.max_x, zoom.min_y, zoom.max_y);
    }

    let mut data_x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut data_y = (f64::INFINITY, f64::NEG_INFINITY);
    for (_, point) in planar {
        data_x.0 = data_x.0.min(point.x - point.err_x);
        data_x.1 = data_x.1.max(point.x + point.err_x);
        data_y.0 = data_y.0.min(point.y - point.err_y);
        data_y.1 = data_y.1.max(point.y + point.err_y);
    }

    let bounds = chart.shape().axis_bounds().unwrap_or_default();
    let (x_min, x_max) = bounds.x_range_or(padded(data_x));
    let (y_min, y_max) = bounds.y_range_or(padded(data_y));

    (
        x_min,
        if x_max > x_min { x_max } else { x_min + 1.0 },
        y_min,
        if y_max > y_min { y_max } else { y_min + 1.0 },
    )
}

fn padded((min, max): (f64, f64)) -> (f64, f64) {
    if min < max {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    } else {
        (min - 1.0, max + 1.0)
    }
}

fn span_caption(low: &Option<String>, high: &Option<String>) -> String {
    match (low, high) {
        (Some(low), Some(high)) => format!("<-- {low} || {high} -->"),
        (Some(low), None) => low.clone(),
        (None, Some(high)) => high.clone(),
        (None, None) => String::new(),
    }
}

pub(crate) fn axis_captions(shape: &ChartShape, title: Option<&str>) -> (String, String) {
    match shape {
        ChartShape::Axis {
            x_left,
            x_right,
            y_bottom,
            y_top,
            ..
        } => (
            span_caption(x_left, x_right),
            span_caption(y_bottom, y_top),
        ),
        ChartShape::Boxed {
            horizontal,
            vertical,
        } => (horizontal.join(" || "), vertical.join(" || ")),
        ChartShape::Alignment { .. } => (
            "Lawful || Neutral || Chaotic".to_string(),
            "Evil || Neutral || Good".to_string(),
        ),
        // The top caption of a triangle chart is drawn as the figure
        // caption, so the y axis is free for the chart title.
        ChartShape::Triangle { x_left, x_right, .. } => (
            span_caption(x_left, x_right),
            title.unwrap_or_default().to_string(),
        ),
        ChartShape::Radar { .. } => (String::new(), String::new()),
    }
}

fn draw_guides(
    ctx: &mut PlanarContext<'_, '_>,
    shape: &ChartShape,
    (x_min, x_max, y_min, y_max): (f64, f64, f64, f64),
) -> RenderResult<()> {
    match shape {
        ChartShape::Axis { .. } => {
            if y_min < 0.0 && y_max > 0.0 {
                ctx.draw_series(LineSeries::new(
                    vec![(x_min, 0.0), (x_max, 0.0)],
                    &BLACK,
                ))
                .map_err(backend_err)?;
            }
            if x_min < 0.0 && x_max > 0.0 {
                ctx.draw_series(LineSeries::new(
                    vec![(0.0, y_min), (0.0, y_max)],
                    &BLACK,
                ))
                .map_err(backend_err)?;
            }
        }
        ChartShape::Boxed { .. } => draw_grid3(ctx)?,
        ChartShape::Alignment { cells } => {
            draw_grid3(ctx)?;
            for row in 0..3 {
                let row_top = GRID_EXTENT - row as f64 * cell_size();
                ctx.draw_series(LineSeries::new(
                    vec![
                        (-GRID_EXTENT, row_top - CAPTION_BAND),
                        (GRID_EXTENT, row_top - CAPTION_BAND),
                    ],
                    &BLACK,
                ))
                .map_err(backend_err)?;
                for column in 0..3 {
                    let cell_left = -GRID_EXTENT + column as f64 * cell_size();
                    ctx.draw_series(std::iter::once(Text::new(
                        cells[row * 3 + column].clone(),
                        (cell_left + 0.2, row_top - 0.2),
                        ("sans-serif", 13),
                    )))
                    .map_err(backend_err)?;
                }
            }
        }
        ChartShape::Triangle { .. } => {
            let outline = vec![
                (0.0, 0.0),
                (crate::model::bounds::TRIANGLE_SIZE / 2.0, crate::model::bounds::TRIANGLE_SIZE),
                (crate::model::bounds::TRIANGLE_SIZE, 0.0),
                (0.0, 0.0),
            ];
            ctx.draw_series(std::iter::once(PathElement::new(outline, BLACK.stroke_width(1))))
                .map_err(backend_err)?;
        }
        ChartShape::Radar { .. } => {}
    }
    Ok(())
}

fn cell_size() -> f64 {
    2.0 * GRID_EXTENT / 3.0
}

fn draw_grid3(ctx: &mut PlanarContext<'_, '_>) -> RenderResult<()> {
    for step in 0..=3 {
        let at = -GRID_EXTENT + step as f64 * cell_size();
        ctx.draw_series(LineSeries::new(
            vec![(at, -GRID_EXTENT), (at, GRID_EXTENT)],
            &BLACK,
        ))
        .map_err(backend_err)?;
        ctx.draw_series(LineSeries::new(
            vec![(-GRID_EXTENT, at), (GRID_EXTENT, at)],
            &BLACK,
        ))
        .map_err(backend_err)?;
    }
    Ok(())
}
