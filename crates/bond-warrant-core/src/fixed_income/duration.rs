//! Coarse interest-rate sensitivity of the bond leg.
//!
//! This is a fixed fraction of maturity, not a Macaulay or modified duration.
//! It only feeds the displayed expected price change, never the warrant pricer.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate, Years};

/// Default fraction of maturity used as the duration proxy.
pub const DEFAULT_DURATION_MULTIPLIER: Decimal = dec!(0.85);

/// Approximate duration: `maturity_years * multiplier`.
pub fn estimate_duration(maturity_years: u32, multiplier: Decimal) -> Years {
    Decimal::from(maturity_years) * multiplier
}

/// First-order price move of the bond for a shift from `current_rate` to
/// `simulated_rate`: `-duration * dy * price`.
pub fn expected_price_change(
    duration: Years,
    current_rate: Rate,
    simulated_rate: Rate,
    current_price: Money,
) -> Money {
    -duration * (simulated_rate - current_rate) * current_price
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_proxy() {
        assert_eq!(estimate_duration(10, DEFAULT_DURATION_MULTIPLIER), dec!(8.50));
        assert_eq!(estimate_duration(1, dec!(0.5)), dec!(0.5));
    }

    #[test]
    fn test_expected_price_change_sign() {
        // +100bp on an 8.5-duration bond at 95.84 -> about -8.15
        let change = expected_price_change(dec!(8.5), dec!(0.035), dec!(0.045), dec!(95.84));
        assert_eq!(change, dec!(-8.14640));
        let rally = expected_price_change(dec!(8.5), dec!(0.035), dec!(0.025), dec!(95.84));
        assert!(rally > Decimal::ZERO);
        assert_eq!(
            expected_price_change(dec!(8.5), dec!(0.035), dec!(0.035), dec!(95.84)),
            Decimal::ZERO
        );
    }
}
