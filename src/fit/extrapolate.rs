//! Evaluation of the fitted model at x = 0.
//!
//! At zero energy variance the polynomial basis collapses to the constant
//! column, so the point prediction is exactly the fitted intercept: the
//! zero-variance-limit total energy. The uncertainty is the upper half of
//! the two-sided `1 - alpha` confidence interval on the mean prediction.

use crate::domain::Extrapolation;
use crate::fit::poly::{PolyFit, design_row};

/// Significance level of the reported interval (95% confidence).
pub const ALPHA: f64 = 0.05;

/// Extrapolate the fit to x = 0.
///
/// The returned `half_width` is raw and may be non-finite when the fit is
/// degenerate (zero residual degrees of freedom, collinear columns);
/// [`Extrapolation::uncertainty`] applies the sentinel for persistence.
pub fn extrapolate(fit: &PolyFit, alpha: f64) -> Extrapolation {
    let zero = design_row(0.0, fit.order);
    let interval = fit.predict_with_interval(&zero, alpha);
    Extrapolation {
        value: interval.mean,
        half_width: interval.upper - interval.mean,
    }
}
