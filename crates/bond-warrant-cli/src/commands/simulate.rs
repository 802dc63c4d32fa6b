use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use bond_warrant_core::market_data::{
    seed_current_rate, Benchmark, Country, RateProvider, RateQuote, StaticRateProvider,
};
use bond_warrant_core::simulation::{payoff_curve, simulate_scenario, SimulatorInput};

use super::engine_config;
use crate::input;

/// Arguments for a single-position simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to a SimulatorInput file (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,

    /// Fraction of remaining time left at the simulated point
    #[arg(long)]
    pub decay_factor: Option<Decimal>,

    /// Quote file used to seed the current rate
    #[arg(long)]
    pub rate_quotes: Option<String>,

    /// Benchmark tenor looked up in --rate-quotes
    #[arg(long, default_value = "10year")]
    pub benchmark: String,

    /// Issuer market looked up in --rate-quotes
    #[arg(long, default_value = "us")]
    pub country: String,
}

/// Arguments for the payoff curve
#[derive(Args)]
pub struct PayoffArgs {
    /// Path to a SimulatorInput file (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simulate(
    args: SimulateArgs,
    config_path: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let config = engine_config(config_path, args.decay_factor)?;
    let mut sim_input: SimulatorInput = input::load(args.input.as_deref(), "simulation")?;

    if let Some(ref path) = args.rate_quotes {
        let quotes: Vec<RateQuote> = input::file::read_document(path)?;
        let provider = StaticRateProvider::new(quotes);
        let benchmark: Benchmark = serde_json::from_value(Value::String(args.benchmark.clone()))
            .map_err(|_| format!("unknown benchmark '{}'", args.benchmark))?;
        let country: Country = serde_json::from_value(Value::String(args.country.clone()))
            .map_err(|_| format!("unknown country '{}'", args.country))?;
        let quote = provider.fetch(benchmark, country)?;
        if quote.monthly_proxy {
            tracing::warn!(%country, "using monthly long-term rate as proxy");
        }
        seed_current_rate(&mut sim_input, &quote);
    }

    let result = simulate_scenario(&sim_input, &config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_payoff(
    args: PayoffArgs,
    config_path: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let config = engine_config(config_path, None)?;
    let sim_input: SimulatorInput = input::load(args.input.as_deref(), "payoff curve")?;
    let curve = payoff_curve(&sim_input, &config)?;
    Ok(serde_json::to_value(curve)?)
}
