use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Prices, premiums and position values.
pub type Money = Decimal;

/// Yields, volatilities and fees as fractions: 0.035 is 3.5%.
pub type Rate = Decimal;

/// Time to expiry and durations.
pub type Years = Decimal;

/// Result of an engine call together with how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    /// Conventions in force for this run
    pub assumptions: serde_json::Value,
    /// Outcomes a caller may misread; never errors
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Wrap `result` in the output envelope.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    let assumptions = serde_json::to_value(assumptions).unwrap_or(serde_json::Value::Null);
    ComputationOutput {
        result,
        methodology: methodology.to_owned(),
        assumptions,
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_owned(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_owned(),
        },
    }
}
