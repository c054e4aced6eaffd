//! SVG figure rendering via Plotters.
//!
//! Mirrors the terminal plot but in a publication-friendly vector format:
//! sample points as filled circles, the fitted curve as a grey line sampled
//! on a fine grid from x = 0 (the extrapolation target) to 20% past the
//! largest sample.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::Samples;
use crate::error::AppError;
use crate::fit::poly::PolyFit;

/// Fixed output filename for `--save_figure`.
pub const FIGURE_FILE: &str = "extrapolate.svg";

/// Number of curve samples, dense enough for a smooth polynomial.
const CURVE_POINTS: usize = 50;

fn render_err(e: impl std::fmt::Display) -> AppError {
    AppError::render(format!("Failed to render figure: {e}"))
}

/// Write the diagnostic figure.
///
/// `preprint` selects the smaller fixed figure size used in manuscripts.
pub fn save_figure(
    path: &Path,
    samples: &Samples,
    fit: &PolyFit,
    preprint: bool,
) -> Result<(), AppError> {
    let (width, height) = if preprint { (550, 400) } else { (800, 600) };

    let x_max = samples
        .x
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let x_max = if x_max.is_finite() && x_max > 0.0 {
        x_max * 1.2
    } else {
        1.0
    };

    let curve: Vec<(f64, f64)> = (0..CURVE_POINTS)
        .map(|i| {
            let x = x_max * i as f64 / (CURVE_POINTS as f64 - 1.0);
            (x, fit.predict(x))
        })
        .collect();

    let (y_min, y_max) = y_bounds(samples, &curve);

    let root = SVGBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Extrapolation", ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("E_var - E_tot (Ha)")
        .y_desc("E_tot (Ha)")
        .light_line_style(&RGBColor(220, 220, 220))
        .x_label_formatter(&|v| format!("{v:.4}"))
        .y_label_formatter(&|v| format!("{v:.4}"))
        .draw()
        .map_err(render_err)?;

    // Fitted curve behind the data points.
    chart
        .draw_series(LineSeries::new(curve, &RGBColor(128, 128, 128)))
        .map_err(render_err)?;

    chart
        .draw_series(
            samples
                .x
                .iter()
                .zip(&samples.y)
                .map(|(&x, &y)| Circle::new((x, y), 4, BLUE.filled())),
        )
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn y_bounds(samples: &Samples, curve: &[(f64, f64)]) -> (f64, f64) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &y in samples.y.iter().chain(curve.iter().map(|(_, y)| y)) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if !(min_y.is_finite() && max_y.is_finite() && max_y > min_y) {
        return (0.0, 1.0);
    }
    let pad = (max_y - min_y) * 0.05;
    (min_y - pad, max_y + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::poly::{fit_wls, inverse_variance_weights};

    #[test]
    fn writes_an_svg_file() {
        let samples = Samples {
            x: vec![0.1, 0.2, 0.3, 0.4],
            y: vec![0.9, 0.8, 0.71, 0.59],
        };
        let w = inverse_variance_weights(&samples.x);
        let fit = fit_wls(&samples.x, &samples.y, &w, 1).unwrap();

        let path = std::env::temp_dir().join(format!(
            "qmc-extrap-figure-{}.svg",
            std::process::id()
        ));
        save_figure(&path, &samples, &fit, true).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(content.contains("<svg"));
    }

    #[test]
    fn unwritable_path_is_a_render_error() {
        let samples = Samples {
            x: vec![0.1, 0.2, 0.3],
            y: vec![0.9, 0.8, 0.7],
        };
        let w = inverse_variance_weights(&samples.x);
        let fit = fit_wls(&samples.x, &samples.y, &w, 1).unwrap();

        let path = Path::new("/nonexistent-dir/extrapolate.svg");
        let err = save_figure(path, &samples, &fit, false).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }
}
