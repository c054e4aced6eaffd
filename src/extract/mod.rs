//! Sample extraction from the result store.
//!
//! Two stages:
//!
//! - [`collect_samples`]: one (x, y) pair per epsilon-variance group, taking
//!   the total energy at the group's numerically smallest epsilon-point
//! - [`filter_smallest`]: optional restriction to the n lowest-energy samples
//!
//! Validation happens here, as close to the raw JSON as possible, so the fit
//! code downstream only ever sees clean parallel `f64` vectors.

use serde_json::Value;

use crate::domain::Samples;
use crate::error::AppError;
use crate::io::store::ResultStore;

/// Derive the (x, y) sequences from the store.
///
/// For every key of `energy_var` that is also present in `energy_total`:
/// scan the group's epsilon-point map, keep the entry whose key parses to
/// the smallest float, and emit
///
/// - `y` = that entry's `value`
/// - `x` = `energy_var[key] - y`
///
/// Groups missing from `energy_total` are skipped. An empty epsilon-point
/// map, a key that does not parse as a number, or a missing/non-numeric
/// `value` field is a fatal schema error.
///
/// Iteration order of the maps does not matter: only a running minimum is
/// tracked per group.
pub fn collect_samples(store: &ResultStore) -> Result<Samples, AppError> {
    let energy_vars = store.energy_var()?;
    let energy_totals = store.energy_total()?;

    let mut x = Vec::with_capacity(energy_vars.len());
    let mut y = Vec::with_capacity(energy_vars.len());

    for (eps_var, variance) in energy_vars {
        let Some(group) = energy_totals.get(eps_var) else {
            continue;
        };
        let group = group.as_object().ok_or_else(|| {
            AppError::schema(format!("energy_total['{eps_var}'] is not an object"))
        })?;

        let variance = variance.as_f64().ok_or_else(|| {
            AppError::schema(format!("energy_var['{eps_var}'] is not a number"))
        })?;

        let energy_total = smallest_eps_point_value(eps_var, group)?;
        y.push(energy_total);
        x.push(variance - energy_total);
    }

    Ok(Samples { x, y })
}

/// Total energy at the numerically smallest epsilon-point of one group.
fn smallest_eps_point_value(
    eps_var: &str,
    group: &serde_json::Map<String, Value>,
) -> Result<f64, AppError> {
    let mut best: Option<(f64, f64)> = None;

    for (eps_pt_key, entry) in group {
        let eps_pt: f64 = eps_pt_key.parse().map_err(|_| {
            AppError::schema(format!(
                "energy_total['{eps_var}'] has non-numeric epsilon-point key '{eps_pt_key}'"
            ))
        })?;
        let value = entry.get("value").and_then(Value::as_f64).ok_or_else(|| {
            AppError::schema(format!(
                "energy_total['{eps_var}']['{eps_pt_key}'] has no numeric 'value'"
            ))
        })?;

        match best {
            Some((min_pt, _)) if eps_pt >= min_pt => {}
            _ => best = Some((eps_pt, value)),
        }
    }

    best.map(|(_, value)| value).ok_or_else(|| {
        AppError::schema(format!("energy_total['{eps_var}'] has no epsilon-point entries"))
    })
}

/// Restrict the samples to the `n_points` entries with smallest y.
///
/// `n_points == 0` disables the filter; `n_points >= len` selects everything
/// unchanged. Otherwise the result is ordered by ascending y (stable on
/// ties), pairing preserved.
pub fn filter_smallest(samples: Samples, n_points: usize) -> Samples {
    if n_points == 0 || n_points >= samples.len() {
        return samples;
    }

    let mut order: Vec<usize> = (0..samples.len()).collect();
    order.sort_by(|&a, &b| {
        samples.y[a]
            .partial_cmp(&samples.y[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(n_points);

    Samples {
        x: order.iter().map(|&i| samples.x[i]).collect(),
        y: order.iter().map(|&i| samples.y[i]).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(value: Value) -> ResultStore {
        ResultStore::from_value(value)
    }

    #[test]
    fn picks_value_at_smallest_eps_point() {
        let s = store(json!({
            "energy_var": {"a": 2.0},
            "energy_total": {
                "a": {
                    "0.5": {"value": 10.0},
                    "0.01": {"value": 1.5},
                    "0.1": {"value": 3.0}
                }
            }
        }));
        let samples = collect_samples(&s).unwrap();
        assert_eq!(samples.y, vec![1.5]);
        assert_eq!(samples.x, vec![2.0 - 1.5]);
    }

    #[test]
    fn eps_points_at_or_above_one_are_still_selectable() {
        // The smallest key must win regardless of scale; epsilon-points are
        // usually below 1.0 but nothing guarantees it.
        let s = store(json!({
            "energy_var": {"a": 5.0},
            "energy_total": {
                "a": {
                    "4.0": {"value": 9.0},
                    "2.0": {"value": 7.0}
                }
            }
        }));
        let samples = collect_samples(&s).unwrap();
        assert_eq!(samples.y, vec![7.0]);
        assert_eq!(samples.x, vec![-2.0]);
    }

    #[test]
    fn groups_missing_from_energy_total_are_skipped() {
        let s = store(json!({
            "energy_var": {"a": 1.0, "orphan": 3.0},
            "energy_total": {
                "a": {"0.5": {"value": 0.9}}
            }
        }));
        let samples = collect_samples(&s).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples.y, vec![0.9]);
    }

    #[test]
    fn x_is_exactly_variance_minus_energy() {
        let s = store(json!({
            "energy_var": {"a": 1.0, "b": 1.0},
            "energy_total": {
                "a": {"0.5": {"value": 0.9}},
                "b": {"0.2": {"value": 0.95}}
            }
        }));
        let samples = collect_samples(&s).unwrap();
        for (i, (&x, &y)) in samples.x.iter().zip(&samples.y).enumerate() {
            let eps_var = if samples.y[i] == 0.9 { "a" } else { "b" };
            let variance = s.as_value()["energy_var"][eps_var].as_f64().unwrap();
            assert_eq!(x, variance - y);
        }
    }

    #[test]
    fn empty_eps_point_map_is_fatal() {
        let s = store(json!({
            "energy_var": {"a": 1.0},
            "energy_total": {"a": {}}
        }));
        let err = collect_samples(&s).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn malformed_eps_point_key_is_fatal() {
        let s = store(json!({
            "energy_var": {"a": 1.0},
            "energy_total": {"a": {"tiny": {"value": 0.9}}}
        }));
        assert!(collect_samples(&s).is_err());
    }

    #[test]
    fn missing_value_field_is_fatal() {
        let s = store(json!({
            "energy_var": {"a": 1.0},
            "energy_total": {"a": {"0.5": {"stderr": 0.1}}}
        }));
        assert!(collect_samples(&s).is_err());
    }

    #[test]
    fn filter_zero_is_a_no_op() {
        let samples = Samples {
            x: vec![0.3, 0.1, 0.2],
            y: vec![3.0, 1.0, 2.0],
        };
        let out = filter_smallest(samples.clone(), 0);
        assert_eq!(out, samples);
    }

    #[test]
    fn filter_larger_than_len_is_a_no_op() {
        let samples = Samples {
            x: vec![0.3, 0.1],
            y: vec![3.0, 1.0],
        };
        let out = filter_smallest(samples.clone(), 5);
        assert_eq!(out, samples);
    }

    #[test]
    fn filter_keeps_the_k_smallest_y() {
        let samples = Samples {
            x: vec![0.4, 0.1, 0.3, 0.2],
            y: vec![4.0, 1.0, 3.0, 2.0],
        };
        let out = filter_smallest(samples, 2);
        assert_eq!(out.y, vec![1.0, 2.0]);
        assert_eq!(out.x, vec![0.1, 0.2]);
    }

    #[test]
    fn filter_breaks_ties_by_original_order() {
        let samples = Samples {
            x: vec![0.1, 0.2, 0.3],
            y: vec![1.0, 1.0, 1.0],
        };
        let out = filter_smallest(samples, 2);
        assert_eq!(out.x, vec![0.1, 0.2]);
    }
}
