use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use bond_warrant_core::simulation::{
    compare as compare_operations, payoff_curve as build_payoff_curve, simulate_scenario,
    sweep as sweep_operations, EngineConfig, SavedOperation, SimulatorInput, SweepAxis,
    SweepMetric,
};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Engine config from an optional JSON string; absent or empty means defaults.
fn parse_config(config_json: Option<String>) -> NapiResult<EngineConfig> {
    match config_json.as_deref().map(str::trim) {
        None | Some("") => Ok(EngineConfig::default()),
        Some(json) => serde_json::from_str(json).map_err(to_napi_error),
    }
}

#[derive(Deserialize)]
struct SweepRequest {
    operations: Vec<SavedOperation>,
    axis: SweepAxis,
    metric: SweepMetric,
}

// ---------------------------------------------------------------------------
// Single position
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: SimulatorInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = simulate_scenario(&input, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn payoff_curve(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: SimulatorInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let curve = build_payoff_curve(&input, &config).map_err(to_napi_error)?;
    serde_json::to_string(&curve).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Saved operations
// ---------------------------------------------------------------------------

/// `request_json` is `{"operations": [...], "axis": "rate", "metric": "roi"}`.
#[napi]
pub fn sweep(request_json: String, config_json: Option<String>) -> NapiResult<String> {
    let request: SweepRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let points = sweep_operations(&request.operations, request.axis, request.metric, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&points).map_err(to_napi_error)
}

#[napi]
pub fn compare(operations_json: String, config_json: Option<String>) -> NapiResult<String> {
    let operations: Vec<SavedOperation> =
        serde_json::from_str(&operations_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let results = compare_operations(&operations, &config).map_err(to_napi_error)?;
    serde_json::to_string(&results).map_err(to_napi_error)
}
