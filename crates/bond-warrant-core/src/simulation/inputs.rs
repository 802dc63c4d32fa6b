//! Scenario records exchanged with callers.
//!
//! Field names are camelCase and every number is a decimal string so saved
//! and exported scenarios parse back to exactly the same values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::derivatives::warrant::{Greeks, WarrantType};
use crate::error::WarrantSimError;
use crate::fixed_income::bond::BondParams;
use crate::types::*;
use crate::WarrantSimResult;

use super::position::AdjustedPnl;

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// Terms of the warrant position being simulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantParams {
    #[serde(rename = "type")]
    pub warrant_type: WarrantType,
    pub strike: Money,
    /// Price paid per warrant
    pub premium: Money,
    /// Units of bond exposure per warrant
    pub ratio: Decimal,
    pub expiry_years: Years,
    /// Annualised volatility as a decimal (0.15 = 15%)
    pub volatility: Rate,
    /// Warrants held
    pub quantity: u64,
}

/// Yields used to price the bond today and in the hypothetical scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketParams {
    pub current_rate: Rate,
    pub simulated_rate: Rate,
    /// Discount rate inside the option model. When absent each valuation
    /// point discounts at its own bond yield.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_free_rate: Option<Rate>,
}

/// Calendar time already elapsed since the trade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeParams {
    pub elapsed_days: Decimal,
}

/// Dealing costs added to the amount invested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostParams {
    /// Fixed amount charged once per position
    #[serde(default)]
    pub flat_fee: Money,
    /// Fraction of the gross premium (0.001 = 10bp)
    #[serde(default)]
    pub proportional_fee: Rate,
}

/// Everything one simulation needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorInput {
    pub warrant: WarrantParams,
    pub bond: BondParams,
    pub market: MarketParams,
    #[serde(default)]
    pub time: TimeParams,
    #[serde(default)]
    pub costs: CostParams,
}

/// A named scenario kept for side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedOperation {
    pub id: String,
    pub name: String,
    pub input: SimulatorInput,
}

// ---------------------------------------------------------------------------
// Output record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorOutput {
    pub current_bond_price: Money,
    pub simulated_bond_price: Money,
    pub current_warrant_value: Money,
    pub simulated_warrant_value: Money,
    /// Exercise value at the simulated bond price
    pub intrinsic_value: Money,
    #[serde(rename = "adjustedPnL")]
    pub adjusted_pnl: AdjustedPnl,
    /// Sensitivities at the simulated point
    pub greeks: Greeks,
    pub duration: Years,
    /// Duration-based estimate of the bond price move between the two yields
    pub price_change: Money,
    /// Simulated rate at which P&L is zero, if one exists in the search range
    pub break_even_rate: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl WarrantParams {
    fn validate(&self) -> WarrantSimResult<()> {
        if self.strike <= Decimal::ZERO {
            return Err(WarrantSimError::invalid("warrant.strike", "must be positive"));
        }
        if self.premium < Decimal::ZERO {
            return Err(WarrantSimError::invalid("warrant.premium", "cannot be negative"));
        }
        if self.ratio <= Decimal::ZERO {
            return Err(WarrantSimError::invalid("warrant.ratio", "must be positive"));
        }
        if self.expiry_years <= Decimal::ZERO {
            return Err(WarrantSimError::invalid("warrant.expiryYears", "must be positive"));
        }
        if self.volatility <= Decimal::ZERO {
            return Err(WarrantSimError::invalid("warrant.volatility", "must be positive"));
        }
        Ok(())
    }
}

impl MarketParams {
    fn validate(&self) -> WarrantSimResult<()> {
        let floor = -Decimal::ONE;
        if self.current_rate <= floor {
            return Err(WarrantSimError::invalid(
                "market.currentRate",
                "must be greater than -100%",
            ));
        }
        if self.simulated_rate <= floor {
            return Err(WarrantSimError::invalid(
                "market.simulatedRate",
                "must be greater than -100%",
            ));
        }
        if matches!(self.risk_free_rate, Some(r) if r <= floor) {
            return Err(WarrantSimError::invalid(
                "market.riskFreeRate",
                "must be greater than -100%",
            ));
        }
        Ok(())
    }
}

impl SimulatorInput {
    /// Check every precondition before any pricing happens.
    pub fn validate(&self) -> WarrantSimResult<()> {
        self.warrant.validate()?;
        self.bond.validate()?;
        self.market.validate()?;
        if self.time.elapsed_days < Decimal::ZERO {
            return Err(WarrantSimError::invalid("time.elapsedDays", "cannot be negative"));
        }
        if self.costs.flat_fee < Decimal::ZERO {
            return Err(WarrantSimError::invalid("costs.flatFee", "cannot be negative"));
        }
        if self.costs.proportional_fee < Decimal::ZERO {
            return Err(WarrantSimError::invalid(
                "costs.proportionalFee",
                "cannot be negative",
            ));
        }
        Ok(())
    }
}
