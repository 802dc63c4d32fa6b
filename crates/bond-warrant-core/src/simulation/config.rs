//! Engine conventions that the pricing formulas leave open.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::WarrantSimError;
use crate::fixed_income::duration::DEFAULT_DURATION_MULTIPLIER;
use crate::types::Rate;
use crate::WarrantSimResult;

/// Tunable conventions of a simulation run. Every field has a default, so a
/// partial config file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Fraction of the remaining time left at the simulated valuation point
    pub simulated_time_decay: Decimal,
    /// Fraction of the remaining time used for the payoff chart
    pub payoff_time_decay: Decimal,
    pub days_per_year: Decimal,
    /// Duration proxy as a fraction of maturity
    pub duration_multiplier: Decimal,
    pub break_even: BreakEvenConfig,
}

/// Search window and resolution for the break-even rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreakEvenConfig {
    pub min_rate: Rate,
    pub max_rate: Rate,
    /// Spacing of the sign-change scan
    pub grid_step: Rate,
    /// Bracket width at which bisection stops
    pub tolerance: Rate,
    pub max_bisections: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            simulated_time_decay: dec!(0.8),
            payoff_time_decay: dec!(0.5),
            days_per_year: dec!(365),
            duration_multiplier: DEFAULT_DURATION_MULTIPLIER,
            break_even: BreakEvenConfig::default(),
        }
    }
}

impl Default for BreakEvenConfig {
    fn default() -> Self {
        BreakEvenConfig {
            min_rate: dec!(0.01),
            max_rate: dec!(0.07),
            grid_step: dec!(0.0005),
            tolerance: dec!(0.000001),
            max_bisections: 64,
        }
    }
}

impl EngineConfig {
    /// Same conventions with a different decay factor for the simulated point.
    pub fn with_simulated_time_decay(mut self, decay: Decimal) -> Self {
        self.simulated_time_decay = decay;
        self
    }

    pub fn validate(&self) -> WarrantSimResult<()> {
        if self.simulated_time_decay < Decimal::ZERO {
            return Err(WarrantSimError::invalid(
                "config.simulatedTimeDecay",
                "cannot be negative",
            ));
        }
        if self.payoff_time_decay < Decimal::ZERO {
            return Err(WarrantSimError::invalid(
                "config.payoffTimeDecay",
                "cannot be negative",
            ));
        }
        if self.days_per_year <= Decimal::ZERO {
            return Err(WarrantSimError::invalid("config.daysPerYear", "must be positive"));
        }
        if self.duration_multiplier < Decimal::ZERO {
            return Err(WarrantSimError::invalid(
                "config.durationMultiplier",
                "cannot be negative",
            ));
        }
        self.break_even.validate()
    }
}

impl BreakEvenConfig {
    pub fn validate(&self) -> WarrantSimResult<()> {
        if self.min_rate <= -Decimal::ONE {
            return Err(WarrantSimError::invalid(
                "config.breakEven.minRate",
                "must be greater than -100%",
            ));
        }
        if self.max_rate <= self.min_rate {
            return Err(WarrantSimError::invalid(
                "config.breakEven.maxRate",
                "must exceed minRate",
            ));
        }
        if self.grid_step <= Decimal::ZERO {
            return Err(WarrantSimError::invalid(
                "config.breakEven.gridStep",
                "must be positive",
            ));
        }
        if self.tolerance <= Decimal::ZERO {
            return Err(WarrantSimError::invalid(
                "config.breakEven.tolerance",
                "must be positive",
            ));
        }
        Ok(())
    }
}
