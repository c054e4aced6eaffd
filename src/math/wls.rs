//! Least-squares plumbing for the polynomial fit.
//!
//! The fit solves one small weighted regression per run:
//!
//! ```text
//! minimize Σ w_i (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - Rows are scaled by `sqrt(w_i)` upstream, so this module only sees an
//!   ordinary least-squares problem.
//! - We use SVD to solve it robustly even when the design matrix is tall
//!   (more rows than columns). (Nalgebra's `QR::solve` is intended for
//!   square systems and will panic for non-square matrices.)
//! - The confidence-interval machinery additionally needs `(XᵀX)⁻¹`; we
//!   build it as a pseudo-inverse from the same SVD so rank-deficient
//!   designs degrade to a usable covariance instead of erroring.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly, or
/// if the decomposition itself fails (non-finite entries make the SVD
/// iteration diverge; `try_svd` reports that as `None` where `svd` would
/// panic).
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().try_svd(true, true, f64::EPSILON, 0)?;

    // Try progressively looser tolerances if strict solve fails. High-order
    // polynomial columns on a narrow x-range are nearly collinear, so we
    // balance numerical stability with solution acceptance.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Pseudo-inverse of the normal matrix `XᵀX`, computed from the SVD of `X`.
///
/// `(XᵀX)⁻¹ = Σ_k v_k v_kᵀ / σ_k²` over the singular triplets with
/// `σ_k` above a relative tolerance. Singular directions are dropped, which
/// matches how a pinv-based regression package treats collinear columns.
///
/// Returns `None` when `X` has no finite, non-zero singular value at all.
pub fn normal_inverse(x: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    let p = x.ncols();
    let svd = x.clone().try_svd(false, true, f64::EPSILON, 0)?;
    let v_t = svd.v_t?;
    let s = &svd.singular_values;

    let s_max = s.iter().cloned().fold(0.0_f64, f64::max);
    if !s_max.is_finite() || s_max <= 0.0 {
        return None;
    }
    let tol = s_max * 1e-12;

    let mut out = DMatrix::zeros(p, p);
    for k in 0..s.len() {
        if s[k] > tol {
            let v = v_t.row(k).transpose();
            out += &v * v.transpose() / (s[k] * s[k]);
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn normal_inverse_matches_direct_inverse_for_full_rank() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let direct = (x.transpose() * &x).try_inverse().unwrap();
        let pinv = normal_inverse(&x).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert!((direct[(i, j)] - pinv[(i, j)]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn non_finite_entries_fail_the_solve_instead_of_panicking() {
        let x = DMatrix::from_row_slice(2, 2, &[f64::INFINITY, 0.0, 1.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(solve_least_squares(&x, &y).is_none());
    }

    #[test]
    fn normal_inverse_drops_singular_directions() {
        // Two identical columns: rank 1. The pseudo-inverse must still be
        // finite everywhere.
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
        let pinv = normal_inverse(&x).unwrap();
        assert!(pinv.iter().all(|v| v.is_finite()));
    }
}
