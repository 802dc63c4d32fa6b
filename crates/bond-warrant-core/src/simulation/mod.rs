pub mod break_even;
pub mod comparison;
pub mod config;
pub mod engine;
pub mod inputs;
pub mod payoff;
pub mod position;
pub mod sweep;

pub use comparison::{compare, ComparisonResult};
pub use config::{BreakEvenConfig, EngineConfig};
pub use engine::{run_simulation, simulate_scenario};
pub use inputs::{
    CostParams, MarketParams, SavedOperation, SimulatorInput, SimulatorOutput, TimeParams,
    WarrantParams,
};
pub use payoff::{payoff_curve, PayoffPoint};
pub use sweep::{sweep, ChartDataPoint, Sweep, SweepAxis, SweepMetric};
