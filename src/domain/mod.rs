//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - passed between pipeline stages without ceremony
//! - constructed directly in tests

use std::path::PathBuf;

/// Explicit run configuration.
///
/// Every component takes what it needs from this struct instead of reading
/// ambient state; `crate::app` builds it from the parsed CLI once.
#[derive(Debug, Clone)]
pub struct ExtrapConfig {
    /// Result store read and rewritten in place.
    pub result_file: PathBuf,
    /// Write the diagnostic figure to `extrapolate.svg`.
    pub save_figure: bool,
    /// Print the terminal plot.
    pub show_figure: bool,
    /// Polynomial order of the fit (validated >= 1 at startup).
    pub order: usize,
    /// Smaller fixed figure size for preprints.
    pub preprint: bool,
    /// If > 0, restrict the fit to the n smallest-energy samples.
    pub n_points: usize,
}

/// Parallel sample sequences derived from the result store.
///
/// One pair per epsilon-variance group:
/// - `x[i]` = energy variance minus total energy (Ha)
/// - `y[i]` = total energy at the group's smallest epsilon-point (Ha)
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Samples {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Sentinel stored in place of a non-finite confidence half-width.
pub const UNCERT_SENTINEL: f64 = 9999.0;

/// Outcome of evaluating the fit at x = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrapolation {
    /// Fitted intercept: the zero-variance-limit total energy (Ha).
    pub value: f64,
    /// Raw one-sided confidence half-width at x = 0.
    ///
    /// May be non-finite for degenerate fits (zero residual degrees of
    /// freedom, collinear design columns). The report prints this raw value;
    /// persistence goes through [`Extrapolation::uncertainty`].
    pub half_width: f64,
}

impl Extrapolation {
    /// Uncertainty as persisted to the store: the half-width, or the sentinel
    /// when the half-width is not a finite number.
    pub fn uncertainty(&self) -> f64 {
        if self.half_width.is_finite() {
            self.half_width
        } else {
            UNCERT_SENTINEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_half_width_passes_through() {
        let e = Extrapolation {
            value: -1.5,
            half_width: 0.002,
        };
        assert_eq!(e.uncertainty(), 0.002);
    }

    #[test]
    fn non_finite_half_width_becomes_sentinel() {
        for hw in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let e = Extrapolation {
                value: -1.5,
                half_width: hw,
            };
            assert_eq!(e.uncertainty(), UNCERT_SENTINEL);
        }
    }
}
