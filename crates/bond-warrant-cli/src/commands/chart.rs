use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use bond_warrant_core::simulation::{compare, sweep, SavedOperation, SweepAxis, SweepMetric};

use super::engine_config;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AxisArg {
    Rate,
    Time,
    Vol,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Roi,
    Pnl,
    Delta,
}

impl From<AxisArg> for SweepAxis {
    fn from(a: AxisArg) -> Self {
        match a {
            AxisArg::Rate => SweepAxis::Rate,
            AxisArg::Time => SweepAxis::Time,
            AxisArg::Vol => SweepAxis::Vol,
        }
    }
}

impl From<MetricArg> for SweepMetric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Roi => SweepMetric::Roi,
            MetricArg::Pnl => SweepMetric::Pnl,
            MetricArg::Delta => SweepMetric::Delta,
        }
    }
}

/// Arguments for a comparison sweep
#[derive(Args)]
pub struct SweepArgs {
    /// Path to a list of saved operations (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,

    /// Input varied along the x axis
    #[arg(long, default_value = "rate")]
    pub axis: AxisArg,

    /// Output plotted per operation
    #[arg(long, default_value = "roi")]
    pub metric: MetricArg,

    /// Fraction of remaining time left at the simulated point
    #[arg(long)]
    pub decay_factor: Option<Decimal>,
}

/// Arguments for side-by-side simulation
#[derive(Args)]
pub struct CompareArgs {
    /// Path to a list of saved operations (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,

    /// Fraction of remaining time left at the simulated point
    #[arg(long)]
    pub decay_factor: Option<Decimal>,
}

pub fn run_sweep(
    args: SweepArgs,
    config_path: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let config = engine_config(config_path, args.decay_factor)?;
    let operations: Vec<SavedOperation> = input::load(args.input.as_deref(), "sweep")?;
    let points = sweep(&operations, args.axis.into(), args.metric.into(), &config)?;
    Ok(serde_json::to_value(points)?)
}

pub fn run_compare(
    args: CompareArgs,
    config_path: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let config = engine_config(config_path, args.decay_factor)?;
    let operations: Vec<SavedOperation> = input::load(args.input.as_deref(), "comparison")?;
    let results = compare(&operations, &config)?;
    Ok(serde_json::to_value(results)?)
}
