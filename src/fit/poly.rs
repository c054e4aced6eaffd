//! Weighted polynomial regression.
//!
//! Given samples `(x_i, y_i)` and an order `m`, we fit
//!
//! ```text
//! y = β₀ + β₁ x + β₂ x² + ... + β_m x^m
//! ```
//!
//! by weighted least squares with inverse-variance weights `w_i = 1/x_i²`:
//! rows are scaled by `sqrt(w_i)` and the resulting ordinary problem is
//! solved by SVD (`math::wls`). The fit keeps enough state (coefficient
//! covariance, residual degrees of freedom) to produce confidence intervals
//! for the mean prediction at arbitrary query rows.
//!
//! Degenerate inputs degrade rather than error where a statistics package
//! would do the same: zero residual degrees of freedom makes the residual
//! variance (and every interval) non-finite, and collinear design columns
//! are handled through the pseudo-inverse covariance.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::math::{normal_inverse, solve_least_squares, t_two_sided};

/// Build the design matrix: constant column first, then `x^1 .. x^order`.
pub fn design_matrix(x: &[f64], order: usize) -> DMatrix<f64> {
    DMatrix::from_fn(x.len(), order + 1, |i, j| x[i].powi(j as i32))
}

/// Build the design row for a single query point.
pub fn design_row(x: f64, order: usize) -> DVector<f64> {
    DVector::from_fn(order + 1, |j, _| x.powi(j as i32))
}

/// Inverse-variance weights `1/x²`.
///
/// A zero x yields an infinite weight. This is a known sharp edge of the
/// weighting scheme: `fit_wls` rejects the non-finite weight with a fit
/// error, instead of silently dropping or clamping the sample.
pub fn inverse_variance_weights(x: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| 1.0 / (v * v)).collect()
}

/// Mean prediction with its two-sided confidence interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

/// A fitted weighted polynomial model.
#[derive(Debug, Clone)]
pub struct PolyFit {
    pub order: usize,
    /// Number of observations.
    pub n_obs: usize,
    /// Residual degrees of freedom, `n - (order + 1)`.
    pub df_resid: f64,
    /// Weighted sum of squared residuals.
    pub ssr: f64,
    /// Weighted R².
    pub r_squared: f64,
    beta: DVector<f64>,
    /// Scaled coefficient covariance `σ² (XwᵀXw)⁻¹`; entries may be
    /// non-finite for zero-df fits.
    cov: DMatrix<f64>,
}

/// Fit `y` against the polynomial design in `x` by weighted least squares.
pub fn fit_wls(x: &[f64], y: &[f64], weights: &[f64], order: usize) -> Result<PolyFit, AppError> {
    let n = x.len();
    if n == 0 {
        return Err(AppError::fit("No samples to fit."));
    }
    debug_assert_eq!(n, y.len());
    debug_assert_eq!(n, weights.len());
    let p = order + 1;

    // An x of exactly 0 gives an infinite weight; catch it here so the run
    // aborts with a clean fit error instead of feeding non-finite rows to
    // the SVD.
    if !weights.iter().all(|w| w.is_finite()) {
        return Err(AppError::fit(
            "Non-finite weight: a sample with x = 0 breaks inverse-variance weighting.",
        ));
    }

    let design = design_matrix(x, order);
    let sqrt_w: Vec<f64> = weights.iter().map(|w| w.sqrt()).collect();

    let xw = DMatrix::from_fn(n, p, |i, j| design[(i, j)] * sqrt_w[i]);
    let yw = DVector::from_fn(n, |i, _| y[i] * sqrt_w[i]);

    let beta = solve_least_squares(&xw, &yw)
        .ok_or_else(|| AppError::fit("Weighted least squares failed: design matrix is singular."))?;

    // Weighted residual sum of squares, on the original (unscaled) design.
    let fitted = &design * &beta;
    let mut ssr = 0.0;
    for i in 0..n {
        let r = y[i] - fitted[i];
        ssr += weights[i] * r * r;
    }

    // Residual variance. With df = 0 this is 0/0 or +inf; both make the
    // intervals non-finite downstream, which is exactly the degenerate-fit
    // signal the extrapolator turns into the sentinel.
    let df_resid = n as f64 - p as f64;
    let sigma2 = ssr / df_resid;

    let cov = match normal_inverse(&xw) {
        Some(inv) => inv * sigma2,
        None => DMatrix::from_element(p, p, f64::NAN),
    };

    let w_sum: f64 = weights.iter().sum();
    let y_bar = weights.iter().zip(y).map(|(w, v)| w * v).sum::<f64>() / w_sum;
    let tss: f64 = weights
        .iter()
        .zip(y)
        .map(|(w, v)| w * (v - y_bar) * (v - y_bar))
        .sum();
    let r_squared = 1.0 - ssr / tss;

    Ok(PolyFit {
        order,
        n_obs: n,
        df_resid,
        ssr,
        r_squared,
        beta,
        cov,
    })
}

impl PolyFit {
    /// Fitted coefficients, intercept first.
    pub fn coefficients(&self) -> &[f64] {
        self.beta.as_slice()
    }

    /// Standard error of each coefficient (may be non-finite for zero-df fits).
    pub fn std_errors(&self) -> Vec<f64> {
        (0..self.beta.len())
            .map(|i| self.cov[(i, i)].sqrt())
            .collect()
    }

    /// Point prediction at a scalar x.
    pub fn predict(&self, x: f64) -> f64 {
        self.predict_row(&design_row(x, self.order))
    }

    /// Point prediction at a prepared design row.
    pub fn predict_row(&self, row: &DVector<f64>) -> f64 {
        row.dot(&self.beta)
    }

    /// Mean prediction with a two-sided `1 - alpha` confidence interval,
    /// using the standard error of the linear predictor and a Student-t
    /// critical value on the residual degrees of freedom.
    pub fn predict_with_interval(&self, row: &DVector<f64>, alpha: f64) -> Interval {
        let mean = self.predict_row(row);
        let var = row.dot(&(&self.cov * row));
        let se = var.sqrt();
        let t = t_two_sided(self.df_resid, alpha);
        Interval {
            mean,
            lower: mean - t * se,
            upper: mean + t * se,
        }
    }
}
