//! Read/write the nested result store.
//!
//! The store is a JSON document produced by the QMC code. We only interpret
//! two subtrees:
//!
//! - `energy_var`: epsilon-variance key -> scalar energy variance
//! - `energy_total`: epsilon-variance key -> { epsilon-point key -> { value, ... } }
//!
//! Everything else (and every unrecognized field inside the entries we do
//! read) must survive a load -> insert one key -> save cycle untouched, so
//! the store wraps the raw [`serde_json::Value`] instead of a typed struct
//! and exposes narrow accessors for the parts we need.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde_json::{Map, Value, json};

use crate::domain::Extrapolation;
use crate::error::AppError;

/// Key added under `energy_total` after extrapolation.
pub const EXTRAPOLATED_KEY: &str = "extrapolated";

/// In-memory result store.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultStore {
    root: Value,
}

impl ResultStore {
    /// Wrap an already-parsed JSON document.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Load a store from disk.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::input(format!("Failed to open result file '{}': {e}", path.display()))
        })?;
        let root: Value = serde_json::from_reader(file).map_err(|e| {
            AppError::input(format!("Invalid JSON in result file '{}': {e}", path.display()))
        })?;
        Ok(Self { root })
    }

    /// Rewrite the store in place, pretty-printed (2-space indent).
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let file = File::create(path).map_err(|e| {
            AppError::input(format!("Failed to write result file '{}': {e}", path.display()))
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.root)
            .map_err(|e| AppError::input(format!("Failed to serialize result store: {e}")))?;
        Ok(())
    }

    /// The `energy_var` subtree: epsilon-variance key -> scalar.
    pub fn energy_var(&self) -> Result<&Map<String, Value>, AppError> {
        self.subtree("energy_var")
    }

    /// The `energy_total` subtree: epsilon-variance key -> epsilon-point map.
    pub fn energy_total(&self) -> Result<&Map<String, Value>, AppError> {
        self.subtree("energy_total")
    }

    fn subtree(&self, key: &str) -> Result<&Map<String, Value>, AppError> {
        self.root
            .get(key)
            .and_then(Value::as_object)
            .ok_or_else(|| {
                AppError::schema(format!("Result store has no '{key}' object"))
            })
    }

    /// Record the extrapolation under `energy_total.extrapolated`, replacing
    /// any entry left by a previous run.
    pub fn insert_extrapolated(&mut self, extrap: &Extrapolation) -> Result<(), AppError> {
        let energy_total = self
            .root
            .get_mut("energy_total")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| AppError::schema("Result store has no 'energy_total' object"))?;
        energy_total.insert(
            EXTRAPOLATED_KEY.to_string(),
            json!({
                "value": extrap.value,
                "uncert": extrap.uncertainty(),
            }),
        );
        Ok(())
    }

    /// Raw document (for tests and round-trip checks).
    pub fn as_value(&self) -> &Value {
        &self.root
    }
}
