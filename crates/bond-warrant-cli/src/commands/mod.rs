pub mod chart;
pub mod simulate;

use rust_decimal::Decimal;

use bond_warrant_core::simulation::EngineConfig;

use crate::input;

/// Engine configuration from `--config`, defaults otherwise, with an
/// optional override of the simulated-point decay factor.
pub fn engine_config(
    path: Option<&str>,
    decay_factor: Option<Decimal>,
) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(p) => input::file::read_document::<EngineConfig>(p)?,
        None => EngineConfig::default(),
    };
    let config = match decay_factor {
        Some(d) => config.with_simulated_time_decay(d),
        None => config,
    };
    config.validate()?;
    tracing::debug!(?config, "engine config");
    Ok(config)
}
