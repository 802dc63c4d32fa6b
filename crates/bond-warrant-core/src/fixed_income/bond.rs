//! Flat-yield pricing of an annual-coupon bond.
//!
//! The model discounts whole coupon periods only: `years` is a period count,
//! not a year fraction, and no accrued interest is computed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::WarrantSimError;
use crate::types::{Money, Rate};
use crate::WarrantSimResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Contractual terms of the underlying bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondParams {
    /// Redemption amount paid at maturity (e.g. 100)
    pub face_value: Money,
    /// Annual coupon rate as a decimal (0.03 = 3%)
    pub coupon_rate: Rate,
    /// Number of remaining annual coupon periods
    pub maturity_years: u32,
}

impl BondParams {
    /// Clean price of these terms at a flat yield.
    pub fn price_at(&self, yield_rate: Rate) -> WarrantSimResult<Money> {
        price_bond(self.face_value, self.coupon_rate, yield_rate, self.maturity_years)
    }

    pub(crate) fn validate(&self) -> WarrantSimResult<()> {
        if self.face_value <= Decimal::ZERO {
            return Err(WarrantSimError::invalid("bond.faceValue", "must be positive"));
        }
        if self.coupon_rate < Decimal::ZERO {
            return Err(WarrantSimError::invalid("bond.couponRate", "cannot be negative"));
        }
        if self.maturity_years == 0 {
            return Err(WarrantSimError::invalid(
                "bond.maturityYears",
                "must be at least one period",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Present value of `years` annual coupons plus the redemption, all
/// discounted at `yield_rate`.
pub fn price_bond(
    face_value: Money,
    coupon_rate: Rate,
    yield_rate: Rate,
    years: u32,
) -> WarrantSimResult<Money> {
    if years == 0 {
        return Err(WarrantSimError::invalid("years", "must be at least one period"));
    }
    if yield_rate <= -Decimal::ONE {
        return Err(WarrantSimError::invalid(
            "yield_rate",
            "must be greater than -100%",
        ));
    }

    let overflow = || {
        WarrantSimError::FinancialImpossibility(format!(
            "bond value at yield {yield_rate} overflows over {years} periods"
        ))
    };

    let growth = Decimal::ONE + yield_rate;
    let coupon = face_value.checked_mul(coupon_rate).ok_or_else(overflow)?;

    let mut discount = Decimal::ONE;
    let mut price = Decimal::ZERO;
    for _ in 0..years {
        discount = discount.checked_div(growth).ok_or_else(overflow)?;
        price = coupon
            .checked_mul(discount)
            .and_then(|pv| price.checked_add(pv))
            .ok_or_else(overflow)?;
    }
    price = face_value
        .checked_mul(discount)
        .and_then(|pv| price.checked_add(pv))
        .ok_or_else(overflow)?;

    Ok(price)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
