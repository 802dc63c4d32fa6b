use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::normal::{checked_exp, ln_decimal, norm_cdf, norm_pdf, sqrt_decimal};
use crate::error::WarrantSimError;
use crate::types::*;
use crate::WarrantSimResult;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Direction of the warrant's claim on the bond price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WarrantType {
    Put,
    Call,
}

impl WarrantType {
    pub fn is_put(self) -> bool {
        matches!(self, WarrantType::Put)
    }
}

/// Sensitivities of the closed-form warrant value.
///
/// Vega and rho are per one percentage point, theta per calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: Decimal,
    pub gamma: Decimal,
    pub vega: Decimal,
    pub theta: Decimal,
    pub rho: Decimal,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_closed_form_input(
    underlying: Money,
    strike: Money,
    volatility: Rate,
) -> WarrantSimResult<()> {
    if underlying <= Decimal::ZERO {
        return Err(WarrantSimError::invalid("underlying_price", "must be positive"));
    }
    if strike <= Decimal::ZERO {
        return Err(WarrantSimError::invalid("strike", "must be positive"));
    }
    if volatility <= Decimal::ZERO {
        return Err(WarrantSimError::invalid("volatility", "must be positive"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Black-Scholes internals
// ---------------------------------------------------------------------------

struct BsParams {
    d1: Decimal,
    d2: Decimal,
    sqrt_t: Decimal,
    exp_neg_rt: Decimal,
}

fn compute_bs_params(
    s: Decimal,
    k: Decimal,
    sigma: Decimal,
    t: Decimal,
    r: Decimal,
) -> WarrantSimResult<BsParams> {
    let sqrt_t = sqrt_decimal(t);
    let sigma_sqrt_t = sigma * sqrt_t;
    let numerator = ln_decimal(s / k) + (r + sigma * sigma / dec!(2)) * t;
    let d1 = numerator.checked_div(sigma_sqrt_t).ok_or_else(|| {
        WarrantSimError::FinancialImpossibility(format!(
            "time to expiry {t} is too small to resolve d1"
        ))
    })?;
    let d2 = d1 - sigma_sqrt_t;
    let exp_neg_rt = checked_exp(-r * t).ok_or_else(|| {
        WarrantSimError::FinancialImpossibility(format!(
            "discount factor exp({}) overflows",
            -r * t
        ))
    })?;
    Ok(BsParams {
        d1,
        d2,
        sqrt_t,
        exp_neg_rt,
    })
}

/// Payoff if exercised immediately.
pub fn intrinsic_value(underlying: Money, strike: Money, warrant_type: WarrantType) -> Money {
    match warrant_type {
        WarrantType::Call => (underlying - strike).max(Decimal::ZERO),
        WarrantType::Put => (strike - underlying).max(Decimal::ZERO),
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Closed-form value of one warrant on a bond trading at `underlying`.
///
/// At or past expiry (`time_to_expiry <= 0`) only intrinsic value remains.
pub fn warrant_value(
    underlying: Money,
    strike: Money,
    volatility: Rate,
    time_to_expiry: Years,
    discount_rate: Rate,
    warrant_type: WarrantType,
) -> WarrantSimResult<Money> {
    validate_closed_form_input(underlying, strike, volatility)?;

    if time_to_expiry <= Decimal::ZERO {
        return Ok(intrinsic_value(underlying, strike, warrant_type));
    }

    let p = compute_bs_params(underlying, strike, volatility, time_to_expiry, discount_rate)?;
    let pv_strike = strike * p.exp_neg_rt;

    let value = match warrant_type {
        WarrantType::Call => underlying * norm_cdf(p.d1) - pv_strike * norm_cdf(p.d2),
        WarrantType::Put => pv_strike * norm_cdf(-p.d2) - underlying * norm_cdf(-p.d1),
    };
    // Rounding in the last digits can leave a far out-of-the-money value just below zero
    Ok(value.max(Decimal::ZERO))
}

/// Delta, gamma, vega, theta and rho of `warrant_value` at the same inputs.
///
/// A settled warrant (`time_to_expiry <= 0`) has no sensitivities left.
pub fn warrant_greeks(
    underlying: Money,
    strike: Money,
    volatility: Rate,
    time_to_expiry: Years,
    discount_rate: Rate,
    warrant_type: WarrantType,
) -> WarrantSimResult<Greeks> {
    validate_closed_form_input(underlying, strike, volatility)?;

    if time_to_expiry <= Decimal::ZERO {
        return Ok(Greeks::default());
    }

    let s = underlying;
    let k = strike;
    let sigma = volatility;
    let t = time_to_expiry;
    let r = discount_rate;
    let p = compute_bs_params(s, k, sigma, t, r)?;
    let nd1 = norm_pdf(p.d1);

    let delta = match warrant_type {
        WarrantType::Call => norm_cdf(p.d1),
        WarrantType::Put => norm_cdf(p.d1) - Decimal::ONE,
    };

    let gamma = nd1 / (s * sigma * p.sqrt_t);

    let vega = s * p.sqrt_t * nd1 / dec!(100);

    // Per calendar day
    let decay = -(s * nd1 * sigma) / (dec!(2) * p.sqrt_t);
    let theta_annual = match warrant_type {
        WarrantType::Call => decay - r * k * p.exp_neg_rt * norm_cdf(p.d2),
        WarrantType::Put => decay + r * k * p.exp_neg_rt * norm_cdf(-p.d2),
    };
    let theta = theta_annual / dec!(365);

    let rho = match warrant_type {
        WarrantType::Call => k * t * p.exp_neg_rt * norm_cdf(p.d2) / dec!(100),
        WarrantType::Put => -k * t * p.exp_neg_rt * norm_cdf(-p.d2) / dec!(100),
    };

    Ok(Greeks {
        delta,
        gamma,
        vega,
        theta,
        rho,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
