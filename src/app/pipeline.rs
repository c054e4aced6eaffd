//! The core extrapolation workflow, separated from presentation and file I/O:
//!
//! extract samples -> filter -> weight -> fit -> extrapolate
//!
//! `crate::app` owns loading/saving the store and printing; everything here
//! is pure given a loaded store, which keeps the whole pipeline testable
//! in-memory.

use crate::domain::{ExtrapConfig, Extrapolation, Samples};
use crate::error::AppError;
use crate::extract::{collect_samples, filter_smallest};
use crate::fit::extrapolate::{ALPHA, extrapolate};
use crate::fit::poly::{PolyFit, fit_wls, inverse_variance_weights};
use crate::io::store::ResultStore;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Samples that entered the fit (after the optional n_points filter).
    pub samples: Samples,
    pub fit: PolyFit,
    pub extrapolation: Extrapolation,
}

/// Execute the extrapolation pipeline on a loaded store.
pub fn run_extrapolation(
    config: &ExtrapConfig,
    store: &ResultStore,
) -> Result<RunOutput, AppError> {
    let samples = collect_samples(store)?;
    let samples = filter_smallest(samples, config.n_points);
    if samples.is_empty() {
        return Err(AppError::schema(
            "No samples: no energy_var group has a matching energy_total entry.",
        ));
    }

    let weights = inverse_variance_weights(&samples.x);
    let fit = fit_wls(&samples.x, &samples.y, &weights, config.order)?;
    let extrapolation = extrapolate(&fit, ALPHA);

    Ok(RunOutput {
        samples,
        fit,
        extrapolation,
    })
}
