//! Distance-from-centroid heatmap overlay.
//!
//! # Responsibility
//! - Interpolate each point's distance from the scatter centroid onto a
//!   grid and draw it as quantized filled cells under the scatter.
//!
//! # Invariants
//! - The overlay is purely derived; it never feeds back into chart state.

use crate::render::{backend_err, PlanarContext, RenderResult};
use plotters::prelude::*;

const LEVELS: usize = 14;
const MIN_GRID_STEPS: usize = 16;
const MAX_GRID_STEPS: usize = 160;
const IDW_EPSILON: f64 = 1e-6;

/// Draws the heatmap and returns the centroid so the caller can mark it.
pub(crate) fn draw_overlay(
    ctx: &mut PlanarContext<'_, '_>,
    points: &[(f64, f64)],
    extent: (f64, f64, f64, f64),
) -> RenderResult<(f64, f64)> {
    let count = points.len() as f64;
    let centroid_x = points.iter().map(|&(x, _)| x).sum::<f64>() / count;
    let centroid_y = points.iter().map(|&(_, y)| y).sum::<f64>() / count;

    // Sample set: every point carries its distance from the centroid, and
    // the centroid itself anchors the zero level.
    let samples: Vec<(f64, f64, f64)> = points
        .iter()
        .map(|&(x, y)| {
            let z = ((x - centroid_x).powi(2) + (y - centroid_y).powi(2)).sqrt();
            (x, y, z)
        })
        .chain(std::iter::once((centroid_x, centroid_y, 0.0)))
        .collect();

    let (x_min, x_max, y_min, y_max) = extent;
    let steps_x = grid_steps(x_min, x_max);
    let steps_y = grid_steps(y_min, y_max);
    let cell_w = (x_max - x_min) / steps_x as f64;
    let cell_h = (y_max - y_min) / steps_y as f64;

    let z_max = samples
        .iter()
        .map(|&(_, _, z)| z)
        .fold(0.0_f64, f64::max)
        .max(IDW_EPSILON);

    let mut cells = Vec::with_capacity(steps_x * steps_y);
    for column in 0..steps_x {
        for row in 0..steps_y {
            let x0 = x_min + column as f64 * cell_w;
            let y0 = y_min + row as f64 * cell_h;
            let z = interpolate(&samples, x0 + cell_w / 2.0, y0 + cell_h / 2.0);
            let level = quantize(z / z_max);
            cells.push(Rectangle::new(
                [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                diverging_color(level).filled(),
            ));
        }
    }

    ctx.draw_series(cells).map_err(backend_err)?;
    Ok((centroid_x, centroid_y))
}

fn grid_steps(min: f64, max: f64) -> usize {
    let steps = (10.0 * (min.abs() + max.abs())).round() as usize;
    steps.clamp(MIN_GRID_STEPS, MAX_GRID_STEPS)
}

/// Inverse-distance-weighted interpolation over the sample set.
fn interpolate(samples: &[(f64, f64, f64)], x: f64, y: f64) -> f64 {
    let mut weighted = 0.0;
    let mut weights = 0.0;
    for &(sx, sy, sz) in samples {
        let distance_sq = (x - sx).powi(2) + (y - sy).powi(2);
        if distance_sq < IDW_EPSILON {
            return sz;
        }
        let weight = 1.0 / distance_sq;
        weighted += weight * sz;
        weights += weight;
    }
    weighted / weights
}

fn quantize(t: f64) -> f64 {
    let clamped = t.clamp(0.0, 1.0);
    (clamped * LEVELS as f64).floor().min(LEVELS as f64 - 1.0) / (LEVELS as f64 - 1.0)
}

/// Diverging blue -> white -> red ramp; low values (near the centroid)
/// read cool, far values read hot.
fn diverging_color(t: f64) -> RGBColor {
    const LOW: (f64, f64, f64) = (33.0, 102.0, 172.0);
    const MID: (f64, f64, f64) = (247.0, 247.0, 247.0);
    const HIGH: (f64, f64, f64) = (178.0, 24.0, 43.0);

    let (from, to, local) = if t < 0.5 {
        (LOW, MID, t * 2.0)
    } else {
        (MID, HIGH, (t - 0.5) * 2.0)
    };

    RGBColor(
        lerp(from.0, to.0, local),
        lerp(from.1, to.1, local),
        lerp(from.2, to.2, local),
    )
}

fn lerp(from: f64, to: f64, t: f64) -> u8 {
    (from + (to - from) * t).round() as u8
}
