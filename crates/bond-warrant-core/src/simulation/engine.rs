use rust_decimal::Decimal;
use std::time::Instant;

use crate::derivatives::warrant::{intrinsic_value, warrant_greeks, warrant_value};
use crate::fixed_income::duration::{estimate_duration, expected_price_change};
use crate::types::*;
use crate::WarrantSimResult;

use super::break_even::find_break_even;
use super::config::EngineConfig;
use super::inputs::{SimulatorInput, SimulatorOutput};
use super::position::{adjusted_pnl, position_value, total_investment};

// ---------------------------------------------------------------------------
// Valuation horizon
// ---------------------------------------------------------------------------

/// Remaining time to expiry at both valuation points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizon {
    pub now: Years,
    pub simulated: Years,
}

impl Horizon {
    pub fn new(input: &SimulatorInput, config: &EngineConfig) -> Self {
        let elapsed = input.time.elapsed_days / config.days_per_year;
        let now = (input.warrant.expiry_years - elapsed).max(Decimal::ZERO);
        Horizon {
            now,
            simulated: now * config.simulated_time_decay,
        }
    }
}

/// Discount rate inside the option model for a point priced at `bond_yield`.
fn discount_rate(input: &SimulatorInput, bond_yield: Rate) -> Rate {
    input.market.risk_free_rate.unwrap_or(bond_yield)
}

/// Position P&L if the simulated yield were `rate`, everything else fixed.
fn simulated_profit_loss(
    input: &SimulatorInput,
    horizon: Horizon,
    investment: Money,
    rate: Rate,
) -> WarrantSimResult<Money> {
    let w = &input.warrant;
    let bond_price = input.bond.price_at(rate)?;
    let value = warrant_value(
        bond_price,
        w.strike,
        w.volatility,
        horizon.simulated,
        discount_rate(input, rate),
        w.warrant_type,
    )?;
    Ok(position_value(value, w.quantity, w.ratio) - investment)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price the bond and the warrant today and under the simulated yield, and
/// derive P&L, Greeks, duration and the break-even rate.
///
/// Pure: the output depends only on `input` and `config`.
pub fn run_simulation(
    input: &SimulatorInput,
    config: &EngineConfig,
) -> WarrantSimResult<SimulatorOutput> {
    config.validate()?;
    input.validate()?;

    let w = &input.warrant;
    let m = &input.market;
    let horizon = Horizon::new(input, config);

    let current_bond_price = input.bond.price_at(m.current_rate)?;
    let simulated_bond_price = input.bond.price_at(m.simulated_rate)?;

    let current_warrant_value = warrant_value(
        current_bond_price,
        w.strike,
        w.volatility,
        horizon.now,
        discount_rate(input, m.current_rate),
        w.warrant_type,
    )?;
    let simulated_discount = discount_rate(input, m.simulated_rate);
    let simulated_warrant_value = warrant_value(
        simulated_bond_price,
        w.strike,
        w.volatility,
        horizon.simulated,
        simulated_discount,
        w.warrant_type,
    )?;

    let adjusted = adjusted_pnl(
        current_warrant_value,
        simulated_warrant_value,
        w,
        &input.costs,
    );

    let greeks = warrant_greeks(
        simulated_bond_price,
        w.strike,
        w.volatility,
        horizon.simulated,
        simulated_discount,
        w.warrant_type,
    )?;

    let duration = estimate_duration(input.bond.maturity_years, config.duration_multiplier);
    let price_change =
        expected_price_change(duration, m.current_rate, m.simulated_rate, current_bond_price);

    // Nothing invested means nothing to recover
    let investment = total_investment(w, &input.costs);
    let break_even_rate = if investment.is_zero() {
        None
    } else {
        find_break_even(
            |rate| simulated_profit_loss(input, horizon, investment, rate),
            &config.break_even,
        )?
    };

    tracing::debug!(
        warrant_type = ?w.warrant_type,
        current_bond_price = %current_bond_price,
        simulated_bond_price = %simulated_bond_price,
        profit_loss = %adjusted.profit_loss,
        break_even_rate = ?break_even_rate,
        "simulation complete"
    );

    Ok(SimulatorOutput {
        current_bond_price,
        simulated_bond_price,
        current_warrant_value,
        simulated_warrant_value,
        intrinsic_value: intrinsic_value(simulated_bond_price, w.strike, w.warrant_type),
        adjusted_pnl: adjusted,
        greeks,
        duration,
        price_change,
        break_even_rate,
    })
}

/// `run_simulation` wrapped in the standard result envelope, with warnings
/// for the outcomes a caller is likely to misread.
pub fn simulate_scenario(
    input: &SimulatorInput,
    config: &EngineConfig,
) -> WarrantSimResult<ComputationOutput<SimulatorOutput>> {
    let start = Instant::now();
    let output = run_simulation(input, config)?;
    let horizon = Horizon::new(input, config);

    let mut warnings: Vec<String> = Vec::new();
    if horizon.now.is_zero() {
        warnings.push(format!(
            "Warrant expired after {} elapsed days; valued at intrinsic value",
            input.time.elapsed_days
        ));
    }
    if output.adjusted_pnl.profit_loss_percent.is_none() {
        warnings.push("Total investment is zero; percentage return is undefined".into());
    }
    if output.break_even_rate.is_none() {
        warnings.push(format!(
            "No break-even rate between {} and {}",
            config.break_even.min_rate, config.break_even.max_rate
        ));
    }

    let assumptions = serde_json::json!({
        "model": "Black-Scholes on flat-yield annual-coupon bond price",
        "simulatedTimeDecay": config.simulated_time_decay.to_string(),
        "daysPerYear": config.days_per_year.to_string(),
        "discountRate": match input.market.risk_free_rate {
            Some(r) => r.to_string(),
            None => "bond yield at each valuation point".to_string(),
        },
        "remainingYearsNow": horizon.now.to_string(),
        "remainingYearsSimulated": horizon.simulated.to_string(),
        "durationMultiplier": config.duration_multiplier.to_string(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Bond warrant scenario simulation (closed-form)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
