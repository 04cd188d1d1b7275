//! Polynomial curve fitting over a chart's raw points.
//!
//! # Responsibility
//! - Fit least-squares polynomials, report R² and format the fitted
//!   equation as plain text.
//! - Render the fitted curve atop the chart's scatter.
//!
//! # Invariants
//! - Fits always use the raw stored points; crowdsource contributions are
//!   never folded into a fit.
//! - Degenerate data surfaces as a typed error, never as a NaN result.

use crate::model::chart::{Chart, ChartShape};
use crate::model::point::{Coordinate, PlanarPoint};
use crate::render::color::label_color;
use crate::render::{
    backend_err, encode_png, planar, RenderError, RenderOptions, PLOT_HEIGHT, PLOT_WIDTH,
};
use log::info;
use nalgebra::{DMatrix, DVector};
use plotters::prelude::*;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FitResult<T> = Result<T, FitError>;

/// Curve-fitting error for degenerate inputs and render failures.
#[derive(Debug)]
pub enum FitError {
    /// Fewer than two points plotted.
    TooFewPoints { actual: usize },
    /// Degree is zero or leaves the system underdetermined.
    InvalidDegree { degree: usize, points: usize },
    /// No y spread (SStot = 0) or a singular normal system.
    DegenerateData,
    /// Radar charts have no planar projection to fit.
    NotPlanar,
    /// Drawing or encoding failure while rendering the fit.
    Render(RenderError),
}

impl Display for FitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewPoints { actual } => write!(
                f,
                "cannot fit a curve through {actual} point(s); at least 2 are required"
            ),
            Self::InvalidDegree { degree, points } => write!(
                f,
                "degree {degree} is not valid for {points} points; expected 1..={}",
                points.saturating_sub(1)
            ),
            Self::DegenerateData => {
                write!(f, "fit is undefined for this data: no y spread or singular system")
            }
            Self::NotPlanar => write!(f, "curve fitting requires a planar chart"),
            Self::Render(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RenderError> for FitError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

/// A fitted polynomial, coefficients in ascending powers of x.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyFit {
    coefficients: Vec<f64>,
}

impl PolyFit {
    /// Least-squares fit of the given degree through `samples`.
    ///
    /// The Vandermonde system is solved by SVD, so clustered x values
    /// degrade gracefully instead of blowing up.
    ///
    /// # Errors
    /// - [`FitError::TooFewPoints`] below two samples.
    /// - [`FitError::InvalidDegree`] for degree 0 or degree >= sample
    ///   count.
    /// - [`FitError::DegenerateData`] when the system is singular.
    pub fn fit(samples: &[(f64, f64)], degree: usize) -> FitResult<Self> {
        if samples.len() < 2 {
            return Err(FitError::TooFewPoints {
                actual: samples.len(),
            });
        }
        if degree == 0 || degree >= samples.len() {
            return Err(FitError::InvalidDegree {
                degree,
                points: samples.len(),
            });
        }

        let rows = samples.len();
        let cols = degree + 1;
        let design = DMatrix::from_fn(rows, cols, |row, col| samples[row].0.powi(col as i32));
        let rhs = DVector::from_iterator(rows, samples.iter().map(|&(_, y)| y));

        let solution = design
            .svd(true, true)
            .solve(&rhs, 1e-12)
            .map_err(|_| FitError::DegenerateData)?;

        Ok(Self {
            coefficients: solution.iter().copied().collect(),
        })
    }

    /// Coefficients in ascending powers of x.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluates the polynomial at `x` (Horner form).
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &coefficient| acc * x + coefficient)
    }

    /// Plain-text equation, highest power first, e.g.
    /// `2.000x^2 - 1.000x + 0.333`.
    ///
    /// Coefficients are rounded to three decimals first; terms that round
    /// to zero are dropped.
    pub fn equation(&self) -> String {
        let terms: Vec<(usize, f64)> = self
            .coefficients
            .iter()
            .map(|coefficient| (coefficient * 1000.0).round() / 1000.0)
            .enumerate()
            .rev()
            .filter(|&(_, coefficient)| coefficient != 0.0)
            .collect();
        if terms.is_empty() {
            return "0".to_string();
        }

        let mut out = String::new();
        for (slot, &(power, coefficient)) in terms.iter().enumerate() {
            let magnitude = coefficient.abs();
            if slot == 0 {
                if coefficient < 0.0 {
                    out.push('-');
                }
            } else if coefficient < 0.0 {
                out.push_str(" - ");
            } else {
                out.push_str(" + ");
            }
            match power {
                0 => out.push_str(&format!("{magnitude:.3}")),
                1 => out.push_str(&format!("{magnitude:.3}x")),
                _ => out.push_str(&format!("{magnitude:.3}x^{power}")),
            }
        }
        out
    }

    /// Coefficient of determination, `1 - SSres/SStot`.
    ///
    /// # Errors
    /// - [`FitError::DegenerateData`] when every y is identical.
    pub fn r_squared(&self, samples: &[(f64, f64)]) -> FitResult<f64> {
        if samples.len() < 2 {
            return Err(FitError::TooFewPoints {
                actual: samples.len(),
            });
        }
        let mean = samples.iter().map(|&(_, y)| y).sum::<f64>() / samples.len() as f64;
        let ss_tot = samples.iter().map(|&(_, y)| (y - mean).powi(2)).sum::<f64>();
        if ss_tot == 0.0 {
            return Err(FitError::DegenerateData);
        }
        let ss_res = samples
            .iter()
            .map(|&(x, y)| (y - self.evaluate(x)).powi(2))
            .sum::<f64>();
        Ok(1.0 - ss_res / ss_tot)
    }
}

/// Plain-text fitted equation without rendering.
pub fn full_equation(chart: &Chart, degree: usize) -> FitResult<String> {
    let labeled = planar_samples(chart)?;
    let samples: Vec<(f64, f64)> = labeled.iter().map(|(_, p)| (p.x, p.y)).collect();
    let fit = PolyFit::fit(&samples, degree)?;
    Ok(fit.equation())
}

/// Renders scatter + fitted curve + equation legend; returns the PNG
/// buffer and R².
pub fn render_fit(chart: &Chart, degree: usize, show_labels: bool) -> FitResult<(Vec<u8>, f64)> {
    let labeled = planar_samples(chart)?;
    let samples: Vec<(f64, f64)> = labeled.iter().map(|(_, p)| (p.x, p.y)).collect();
    let fit = PolyFit::fit(&samples, degree)?;
    let r_squared = fit.r_squared(&samples)?;
    let equation = fit.equation();

    let mut raw = vec![0u8; (PLOT_WIDTH * PLOT_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (PLOT_WIDTH, PLOT_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let (x_min, x_max, y_min, y_max) =
            planar::extent(chart, &labeled, &RenderOptions::default());
        let (x_caption, y_caption) = planar::axis_captions(chart.shape(), chart.title());

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(12)
            .x_label_area_size(48)
            .y_label_area_size(48);
        if let Some(title) = chart.title() {
            builder.caption(title, ("sans-serif", 28));
        }
        let mut ctx = builder
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_err)?;
        ctx.configure_mesh()
            .x_desc(x_caption)
            .y_desc(y_caption)
            .axis_desc_style(("sans-serif", 16))
            .label_style(("sans-serif", 12))
            .draw()
            .map_err(draw_err)?;

        if y_min < 0.0 && y_max > 0.0 {
            ctx.draw_series(LineSeries::new(vec![(x_min, 0.0), (x_max, 0.0)], &BLACK))
                .map_err(draw_err)?;
        }
        if x_min < 0.0 && x_max > 0.0 {
            ctx.draw_series(LineSeries::new(vec![(0.0, y_min), (0.0, y_max)], &BLACK))
                .map_err(draw_err)?;
        }

        for (label, point) in &labeled {
            let color = label_color(label);
            ctx.draw_series(std::iter::once(Circle::new(
                (point.x, point.y),
                4,
                color.filled(),
            )))
            .map_err(draw_err)?;
            if show_labels {
                ctx.draw_series(std::iter::once(Text::new(
                    label.clone(),
                    (point.x, point.y),
                    ("sans-serif", 13),
                )))
                .map_err(draw_err)?;
            }
        }

        let curve_start = samples.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
        let curve_end = samples
            .iter()
            .map(|&(x, _)| x)
            .fold(f64::NEG_INFINITY, f64::max);
        let steps = (samples.len() * 10).max(64);
        ctx.draw_series(LineSeries::new(
            (0..=steps).map(|step| {
                let x = curve_start + (curve_end - curve_start) * step as f64 / steps as f64;
                (x, fit.evaluate(x))
            }),
            BLUE.stroke_width(2),
        ))
        .map_err(draw_err)?
        .label(format!("y = {equation}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE.stroke_width(2)));

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(BLACK)
            .background_style(WHITE.mix(0.85))
            .label_font(("sans-serif", 12))
            .draw()
            .map_err(draw_err)?;

        root.draw(&Text::new(
            format!("ID: ({})", chart.id()),
            (8, 4),
            ("sans-serif", 11).into_font().color(&BLACK.mix(0.6)),
        ))
        .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }
    let buffer = encode_png(&raw, PLOT_WIDTH, PLOT_HEIGHT)?;

    info!(
        "event=polyfit module=fit status=ok degree={} points={} r2={:.4}",
        degree,
        samples.len(),
        r_squared
    );
    Ok((buffer, r_squared))
}

fn draw_err<E: Display>(err: E) -> FitError {
    FitError::Render(backend_err(err))
}

/// Raw labeled planar points; radar charts cannot be fitted.
fn planar_samples(chart: &Chart) -> FitResult<Vec<(String, PlanarPoint)>> {
    if matches!(chart.shape(), ChartShape::Radar { .. }) {
        return Err(FitError::NotPlanar);
    }
    Ok(chart
        .points()
        .into_iter()
        .filter_map(|point| match point.coordinate {
            Coordinate::Planar(planar) => Some((point.label, planar)),
            Coordinate::Radial(_) => None,
        })
        .collect())
}
