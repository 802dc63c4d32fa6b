use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::derivatives::warrant::warrant_value;
use crate::types::*;
use crate::WarrantSimResult;

use super::config::EngineConfig;
use super::engine::Horizon;
use super::inputs::SimulatorInput;
use super::position::{position_value, total_investment};
use super::sweep::SweepAxis;

/// Position outcome if the bond yield moved to `rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffPoint {
    /// Yield in percent points
    pub rate: Decimal,
    pub bond_price: Money,
    pub warrant_value: Money,
    pub pnl: Money,
}

/// P&L profile of one position across the rate grid.
///
/// The warrant is valued at `payoffTimeDecay` of the remaining time and each
/// point discounts at its own swept yield, so the curve is not the same
/// series a rate sweep produces.
pub fn payoff_curve(
    input: &SimulatorInput,
    config: &EngineConfig,
) -> WarrantSimResult<Vec<PayoffPoint>> {
    config.validate()?;
    input.validate()?;

    let w = &input.warrant;
    let remaining = Horizon::new(input, config).now * config.payoff_time_decay;
    let investment = total_investment(w, &input.costs);

    let points = SweepAxis::Rate
        .grid()
        .into_iter()
        .map(|rate| {
            let yield_rate = rate / dec!(100);
            let bond_price = input.bond.price_at(yield_rate)?;
            let value = warrant_value(
                bond_price,
                w.strike,
                w.volatility,
                remaining,
                yield_rate,
                w.warrant_type,
            )?;
            Ok(PayoffPoint {
                rate,
                bond_price,
                warrant_value: value,
                pnl: position_value(value, w.quantity, w.ratio) - investment,
            })
        })
        .collect::<WarrantSimResult<Vec<_>>>()?;

    tracing::debug!(points = points.len(), remaining = %remaining, "payoff curve");
    Ok(points)
}
