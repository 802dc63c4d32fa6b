use serde::{Deserialize, Serialize};

use crate::WarrantSimResult;

use super::config::EngineConfig;
use super::engine::run_simulation;
use super::inputs::{SavedOperation, SimulatorInput, SimulatorOutput};

/// A saved operation together with its simulation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub id: String,
    pub name: String,
    pub input: SimulatorInput,
    pub result: SimulatorOutput,
}

/// Simulate every operation as saved. Order is preserved and the first
/// failure aborts the whole comparison.
pub fn compare(
    operations: &[SavedOperation],
    config: &EngineConfig,
) -> WarrantSimResult<Vec<ComparisonResult>> {
    operations
        .iter()
        .map(|op| {
            let result = run_simulation(&op.input, config).map_err(|e| {
                tracing::warn!(operation = %op.id, error = %e, "comparison operation failed");
                e
            })?;
            Ok(ComparisonResult {
                id: op.id.clone(),
                name: op.name.clone(),
                input: op.input.clone(),
                result,
            })
        })
        .collect()
}
