use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

use super::inputs::{CostParams, WarrantParams};

/// Position-level economics of the warrant holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedPnl {
    pub total_investment: Money,
    pub current_position: Money,
    pub simulated_position: Money,
    pub profit_loss: Money,
    /// `None` when nothing was invested and a return is undefined
    pub profit_loss_percent: Option<Decimal>,
}

/// Premium paid for the whole position plus dealing costs.
pub fn total_investment(warrant: &WarrantParams, costs: &CostParams) -> Money {
    let gross = warrant.premium * Decimal::from(warrant.quantity) * warrant.ratio;
    gross * (Decimal::ONE + costs.proportional_fee) + costs.flat_fee
}

/// Market value of `quantity` warrants each worth `unit_value`.
pub fn position_value(unit_value: Money, quantity: u64, ratio: Decimal) -> Money {
    unit_value * Decimal::from(quantity) * ratio
}

/// Return on investment in percent, undefined for a zero investment.
pub fn return_percent(profit_loss: Money, investment: Money) -> Option<Decimal> {
    if investment.is_zero() {
        return None;
    }
    Some(profit_loss / investment * dec!(100))
}

/// P&L of moving from the current to the simulated warrant value.
pub fn adjusted_pnl(
    current_value: Money,
    simulated_value: Money,
    warrant: &WarrantParams,
    costs: &CostParams,
) -> AdjustedPnl {
    let invested = total_investment(warrant, costs);
    let current_position = position_value(current_value, warrant.quantity, warrant.ratio);
    let simulated_position = position_value(simulated_value, warrant.quantity, warrant.ratio);
    let profit_loss = simulated_position - invested;

    AdjustedPnl {
        total_investment: invested,
        current_position,
        simulated_position,
        profit_loss,
        profit_loss_percent: return_percent(profit_loss, invested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivatives::warrant::WarrantType;

    fn warrant() -> WarrantParams {
        WarrantParams {
            warrant_type: WarrantType::Put,
            strike: dec!(100),
            premium: dec!(2.5),
            ratio: dec!(0.1),
            expiry_years: dec!(1),
            volatility: dec!(0.15),
            quantity: 1000,
        }
    }

    #[test]
    fn test_pnl_without_costs() {
        let pnl = adjusted_pnl(dec!(3), dec!(4), &warrant(), &CostParams::default());
        assert_eq!(pnl.total_investment, dec!(250));
        assert_eq!(pnl.current_position, dec!(300));
        assert_eq!(pnl.simulated_position, dec!(400));
        assert_eq!(pnl.profit_loss, dec!(150));
        assert_eq!(pnl.profit_loss_percent, Some(dec!(60)));
    }

    #[test]
    fn test_costs_increase_investment() {
        let costs = CostParams {
            flat_fee: dec!(10),
            proportional_fee: dec!(0.02),
        };
        // 250 * 1.02 + 10
        assert_eq!(total_investment(&warrant(), &costs), dec!(265));
        let pnl = adjusted_pnl(dec!(2.5), dec!(2.5), &warrant(), &costs);
        assert_eq!(pnl.profit_loss, dec!(-15));
    }

    #[test]
    fn test_zero_premium_return_undefined() {
        let free = WarrantParams {
            premium: Decimal::ZERO,
            ..warrant()
        };
        let pnl = adjusted_pnl(dec!(1), dec!(2), &free, &CostParams::default());
        assert_eq!(pnl.total_investment, Decimal::ZERO);
        assert_eq!(pnl.profit_loss, dec!(200));
        assert_eq!(pnl.profit_loss_percent, None);
    }

    #[test]
    fn test_zero_quantity_return_undefined() {
        let none_held = WarrantParams {
            quantity: 0,
            ..warrant()
        };
        let pnl = adjusted_pnl(dec!(1), dec!(2), &none_held, &CostParams::default());
        assert_eq!(pnl.profit_loss, Decimal::ZERO);
        assert!(pnl.profit_loss_percent.is_none());
    }
}
