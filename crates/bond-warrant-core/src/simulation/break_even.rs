//! Break-even search over the simulated rate.
//!
//! P&L as a function of the simulated rate is continuous but not necessarily
//! monotonic, so the search scans a fixed grid for the first sign change and
//! bisects inside that bracket. The lowest crossing wins when several exist.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};
use crate::WarrantSimResult;

use super::config::BreakEvenConfig;

/// First rate in `[min_rate, max_rate]` where `pnl` reaches zero, or `None`
/// when the scan finds no sign change.
///
/// Cost is bounded by the grid size plus `max_bisections` evaluations.
pub fn find_break_even<F>(pnl: F, config: &BreakEvenConfig) -> WarrantSimResult<Option<Rate>>
where
    F: Fn(Rate) -> WarrantSimResult<Money>,
{
    config.validate()?;

    let mut lo = config.min_rate;
    let mut f_lo = pnl(lo)?;
    if f_lo.is_zero() {
        return Ok(Some(lo));
    }

    while lo < config.max_rate {
        let hi = (lo + config.grid_step).min(config.max_rate);
        let f_hi = pnl(hi)?;
        if f_hi.is_zero() {
            return Ok(Some(hi));
        }
        if f_lo.is_sign_negative() != f_hi.is_sign_negative() {
            let rate = bisect(&pnl, (lo, f_lo), hi, config)?;
            tracing::trace!(%lo, %hi, %rate, "break-even bracket refined");
            return Ok(Some(rate));
        }
        lo = hi;
        f_lo = f_hi;
    }

    Ok(None)
}

fn bisect<F>(
    pnl: &F,
    (mut lo, mut f_lo): (Rate, Money),
    mut hi: Rate,
    config: &BreakEvenConfig,
) -> WarrantSimResult<Rate>
where
    F: Fn(Rate) -> WarrantSimResult<Money>,
{
    let two = dec!(2);
    for _ in 0..config.max_bisections {
        if hi - lo <= config.tolerance {
            break;
        }
        let mid = (lo + hi) / two;
        let f_mid = pnl(mid)?;
        if f_mid.is_zero() {
            return Ok(mid);
        }
        if f_mid.is_sign_negative() == f_lo.is_sign_negative() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Ok((lo + hi) / two)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarrantSimError;
    use std::cell::Cell;

    #[test]
    fn test_linear_crossing() {
        // Zero at 4.321%
        let root = find_break_even(
            |r| Ok((r - dec!(0.04321)) * dec!(1000)),
            &BreakEvenConfig::default(),
        )
        .unwrap()
        .unwrap();
        assert!((root - dec!(0.04321)).abs() <= dec!(0.000001), "root {root}");
    }

    #[test]
    fn test_decreasing_function_crossing() {
        let root = find_break_even(
            |r| Ok(dec!(0.025) - r),
            &BreakEvenConfig::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(root, dec!(0.025));
    }

    #[test]
    fn test_no_crossing_returns_none() {
        let always_losing = find_break_even(|r| Ok(-dec!(5) - r), &BreakEvenConfig::default());
        assert_eq!(always_losing.unwrap(), None);
        let always_winning = find_break_even(|_| Ok(dec!(1)), &BreakEvenConfig::default());
        assert_eq!(always_winning.unwrap(), None);
    }

    #[test]
    fn test_first_of_several_crossings() {
        // Roots at 2% and 5%
        let root = find_break_even(
            |r| Ok((r - dec!(0.02)) * (r - dec!(0.05))),
            &BreakEvenConfig::default(),
        )
        .unwrap()
        .unwrap();
        assert!((root - dec!(0.02)).abs() <= dec!(0.000001), "root {root}");
    }

    #[test]
    fn test_root_at_lower_bound() {
        let root = find_break_even(|r| Ok(r - dec!(0.01)), &BreakEvenConfig::default()).unwrap();
        assert_eq!(root, Some(dec!(0.01)));
    }

    #[test]
    fn test_evaluation_count_is_bounded() {
        let calls = Cell::new(0u32);
        let cfg = BreakEvenConfig::default();
        let _ = find_break_even(
            |r| {
                calls.set(calls.get() + 1);
                Ok(r - dec!(0.06999))
            },
            &cfg,
        )
        .unwrap();
        // 121 grid samples at most, plus the bisection cap
        assert!(calls.get() <= 121 + cfg.max_bisections);
    }

    #[test]
    fn test_errors_propagate() {
        let result = find_break_even(
            |_| Err(WarrantSimError::FinancialImpossibility("boom".into())),
            &BreakEvenConfig::default(),
        );
        assert!(result.is_err());
    }
}
