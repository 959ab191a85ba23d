//! Renders a solver run as a PNG: the function curve, dashed axes, one
//! marker per iteration point, and a highlighted root.
//!
//! The interface is deliberately narrow — a sampling closure plus a
//! [`Figure`] of plain data — so the rendering backend can be swapped
//! without touching solver logic. Samples where the function is
//! undefined are skipped, never fatal.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;
use thiserror::Error;

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 640;
const SAMPLES: usize = 400;

/// Errors raised while drawing or encoding the image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing failed: {reason}")]
    Backend { reason: String },

    #[error("png encoding failed: {reason}")]
    Encode { reason: String },
}

/// Plain-data description of one rendered figure.
#[derive(Debug, Clone)]
pub struct Figure {
    root: (f64, f64),
    bracket: Option<(f64, f64)>,
    points: Vec<(f64, f64)>,
}

impl Figure {
    /// Starts a figure highlighting the root at `(x, f(x))`.
    #[must_use]
    pub fn new(root: (f64, f64)) -> Self {
        Self {
            root,
            bracket: None,
            points: Vec::new(),
        }
    }

    /// Sets the bracketing interval the solver searched.
    #[must_use]
    pub fn with_bracket(mut self, a: f64, b: f64) -> Self {
        self.bracket = Some((a, b));
        self
    }

    /// Adds one marker per iteration point.
    #[must_use]
    pub fn with_points(mut self, points: &[(f64, f64)]) -> Self {
        self.points = points.to_vec();
        self
    }

    /// The x-range of the plot: the bracket with one unit of margin, or
    /// for a seeded run the root's ±3 neighborhood, widened either way
    /// to keep every iteration point in view.
    fn x_range(&self) -> (f64, f64) {
        let (root_x, _) = self.root;
        let mut lo = root_x;
        let mut hi = root_x;
        for &(x, _) in &self.points {
            lo = lo.min(x);
            hi = hi.max(x);
        }

        match self.bracket {
            Some((a, b)) => (lo.min(a).min(b) - 1.0, hi.max(a).max(b) + 1.0),
            None => ((root_x - 3.0).min(lo - 1.0), (root_x + 3.0).max(hi + 1.0)),
        }
    }
}

/// Draws the figure and returns encoded PNG bytes.
///
/// `f` returns `None` wherever the function is undefined; those samples
/// are left out of the curve.
///
/// # Errors
///
/// Returns an error if the drawing backend or PNG encoder fails.
pub fn render_png<F>(f: F, figure: &Figure) -> Result<Vec<u8>, RenderError>
where
    F: Fn(f64) -> Option<f64>,
{
    let (x_min, x_max) = figure.x_range();
    let step = (x_max - x_min) / SAMPLES as f64;

    let curve: Vec<(f64, f64)> = (0..=SAMPLES)
        .filter_map(|i| {
            let x = x_min + step * i as f64;
            f(x).filter(|y| y.is_finite()).map(|y| (x, y))
        })
        .collect();

    let (y_min, y_max) = y_range(&curve, &figure.points, figure.root);

    let mut buffer = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let area = BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
        area.fill(&WHITE).map_err(backend)?;

        let mut chart = ChartBuilder::on(&area)
            .margin(16)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(backend)?;

        // Dashed axis lines, clipped by the chart if out of view.
        chart
            .draw_series(DashedLineSeries::new(
                [(x_min, 0.0), (x_max, 0.0)],
                6,
                4,
                BLACK.mix(0.5).stroke_width(1),
            ))
            .map_err(backend)?;
        chart
            .draw_series(DashedLineSeries::new(
                [(0.0, y_min), (0.0, y_max)],
                6,
                4,
                BLACK.mix(0.5).stroke_width(1),
            ))
            .map_err(backend)?;

        chart
            .draw_series(LineSeries::new(curve, BLUE.stroke_width(2)))
            .map_err(backend)?;

        chart
            .draw_series(
                figure
                    .points
                    .iter()
                    .map(|&point| Circle::new(point, 3, BLUE.filled())),
            )
            .map_err(backend)?;

        chart
            .draw_series(std::iter::once(Circle::new(figure.root, 5, RED.filled())))
            .map_err(backend)?;

        area.present().map_err(backend)?;
    }

    encode(&buffer)
}

/// Auto-scales the y-range to the finite samples, markers, and the
/// x-axis, with a proportional margin.
fn y_range(curve: &[(f64, f64)], points: &[(f64, f64)], root: (f64, f64)) -> (f64, f64) {
    let mut lo = 0.0f64;
    let mut hi = 0.0f64;
    for &(_, y) in curve.iter().chain(points).chain(std::iter::once(&root)) {
        if y.is_finite() {
            lo = lo.min(y);
            hi = hi.max(y);
        }
    }

    let margin = 0.1 * (hi - lo).max(1.0);
    (lo - margin, hi + margin)
}

fn backend<E: std::fmt::Display>(error: E) -> RenderError {
    RenderError::Backend {
        reason: error.to_string(),
    }
}

fn encode(buffer: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(buffer, WIDTH, HEIGHT, ExtendedColorType::Rgb8)
        .map_err(|error| RenderError::Encode {
            reason: error.to_string(),
        })?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const PNG_SIGNATURE: [u8; 4] = [0x89, b'P', b'N', b'G'];

    #[test]
    fn renders_a_png() {
        let figure = Figure::new((std::f64::consts::SQRT_2, 0.0))
            .with_bracket(0.0, 2.0)
            .with_points(&[(1.0, -1.0), (1.5, 0.25), (1.25, -0.4375)]);
        let png = render_png(|x| Some(x * x - 2.0), &figure).expect("should render");

        assert_eq!(&png[..4], &PNG_SIGNATURE);
    }

    #[test]
    fn skips_undefined_samples() {
        // ln(x) - 1 is undefined left of zero; the range still crosses it.
        let figure = Figure::new((std::f64::consts::E, 0.0)).with_bracket(-0.5, 4.0);
        let png = render_png(
            |x| (x > 0.0).then(|| x.ln() - 1.0),
            &figure,
        )
        .expect("undefined samples are skipped, not fatal");

        assert_eq!(&png[..4], &PNG_SIGNATURE);
    }

    #[test]
    fn renders_even_when_function_is_never_defined() {
        let figure = Figure::new((1.0, 0.0));
        let png = render_png(|_| None, &figure).expect("should render an empty curve");

        assert_eq!(&png[..4], &PNG_SIGNATURE);
    }

    #[test]
    fn bracket_range_adds_unit_margins() {
        let figure = Figure::new((1.4, 0.0)).with_bracket(0.0, 2.0);
        let (lo, hi) = figure.x_range();

        assert_relative_eq!(lo, -1.0);
        assert_relative_eq!(hi, 3.0);
    }

    #[test]
    fn seeded_range_covers_root_neighborhood_and_points() {
        let figure = Figure::new((1.5, 0.0));
        let (lo, hi) = figure.x_range();
        assert_relative_eq!(lo, -1.5);
        assert_relative_eq!(hi, 4.5);

        // A wandering iterate widens the range past the ±3 neighborhood.
        let figure = Figure::new((1.5, 0.0)).with_points(&[(8.0, 3.0)]);
        let (_, hi) = figure.x_range();
        assert_relative_eq!(hi, 9.0);
    }
}
