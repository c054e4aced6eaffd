//! Formatted terminal output: regression summary and confidence report.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::Extrapolation;
use crate::fit::poly::PolyFit;

/// Format the regression fit summary table.
pub fn format_fit_summary(fit: &PolyFit) -> String {
    let mut out = String::new();

    out.push_str("=== extrap - Weighted polynomial fit ===\n");
    out.push_str(&format!(
        "Observations: {} | order: {} | df resid: {}\n",
        fit.n_obs, fit.order, fit.df_resid
    ));
    out.push_str(&format!(
        "Weighted SSR: {:.6e} | weighted R^2: {:.6}\n",
        fit.ssr, fit.r_squared
    ));

    out.push_str("\nCoefficients:\n");
    out.push_str(&format!(
        "  {:<8} {:>18} {:>14} {:>12}\n",
        "term", "coef", "std err", "t"
    ));
    let std_errors = fit.std_errors();
    for (i, (&coef, &se)) in fit.coefficients().iter().zip(&std_errors).enumerate() {
        let term = if i == 0 {
            "const".to_string()
        } else {
            format!("x^{i}")
        };
        out.push_str(&format!(
            "  {:<8} {:>18.10} {:>14.4e} {:>12.4}\n",
            term,
            coef,
            se,
            coef / se
        ));
    }

    out
}

/// Format the one-line confidence/estimate/uncertainty report.
///
/// Shows the raw half-width even when it is non-finite; the sentinel only
/// applies to the persisted store entry.
pub fn format_extrapolation(extrap: &Extrapolation, alpha: f64) -> String {
    format!(
        "({:.2} Conf.) Extrapolated Energy: {:.10} +- {:.10}",
        1.0 - alpha,
        extrap.value,
        extrap.half_width
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::poly::{fit_wls, inverse_variance_weights};

    #[test]
    fn summary_lists_one_row_per_coefficient() {
        let x = [0.1, 0.2, 0.3, 0.4, 0.5];
        let y = [0.91, 0.82, 0.71, 0.62, 0.53];
        let w = inverse_variance_weights(&x);
        let fit = fit_wls(&x, &y, &w, 2).unwrap();

        let summary = format_fit_summary(&fit);
        assert!(summary.contains("const"));
        assert!(summary.contains("x^1"));
        assert!(summary.contains("x^2"));
        assert!(summary.contains("Observations: 5"));
    }

    #[test]
    fn report_line_has_fixed_precision() {
        let extrap = Extrapolation {
            value: 1.0,
            half_width: 0.25,
        };
        assert_eq!(
            format_extrapolation(&extrap, 0.05),
            "(0.95 Conf.) Extrapolated Energy: 1.0000000000 +- 0.2500000000"
        );
    }

    #[test]
    fn report_line_shows_raw_nan_half_width() {
        let extrap = Extrapolation {
            value: 1.0,
            half_width: f64::NAN,
        };
        let line = format_extrapolation(&extrap, 0.05);
        assert!(line.contains("+- NaN"));
    }
}
