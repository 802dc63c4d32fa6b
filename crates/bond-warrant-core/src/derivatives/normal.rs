//! Standard normal distribution and the decimal transcendental helpers the
//! closed-form formulas are built on.
//!
//! Everything here stays in `Decimal`: exp via range-reduced Taylor series,
//! ln via binary range reduction plus the atanh series, sqrt via Newton.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const LN_2: Decimal = dec!(0.6931471805599453094172321215);
const SQRT_2: Decimal = dec!(1.4142135623730950488016887242);
const INV_SQRT_2PI: Decimal = dec!(0.3989422804014326779399460599);

// Abramowitz & Stegun 7.1.26
const AS_A1: Decimal = dec!(0.254829592);
const AS_A2: Decimal = dec!(-0.284496736);
const AS_A3: Decimal = dec!(1.421413741);
const AS_A4: Decimal = dec!(-1.453152027);
const AS_A5: Decimal = dec!(1.061405429);
const AS_P: Decimal = dec!(0.3275911);

/// Beyond this |x| the density is below 1e-340 and the CDF is exactly 0 or 1
/// at 28 digits, so both short-circuit instead of squaring huge arguments.
const TAIL_CUTOFF: Decimal = dec!(40);

/// Largest argument `exp_decimal` accepts without overflowing `Decimal::MAX`.
pub(crate) const EXP_MAX_ARG: Decimal = dec!(66);

// ---------------------------------------------------------------------------
// Decimal math helpers
// ---------------------------------------------------------------------------

/// Taylor series exp(x) with range reduction for |x| > 2.
///
/// Arguments above `EXP_MAX_ARG` overflow; callers that can reach them must
/// check first (see `checked_exp`).
pub(crate) fn exp_decimal(x: Decimal) -> Decimal {
    let two = dec!(2);

    if x > two || x < -two {
        let half = exp_decimal(x / two);
        return half * half;
    }

    let mut sum = Decimal::ONE;
    let mut term = Decimal::ONE;
    for n in 1u32..=25 {
        term = term * x / Decimal::from(n);
        if term.is_zero() {
            break;
        }
        sum += term;
    }
    sum
}

/// exp(x), or `None` when the result would not fit in a `Decimal`.
pub(crate) fn checked_exp(x: Decimal) -> Option<Decimal> {
    if x > EXP_MAX_ARG {
        None
    } else {
        Some(exp_decimal(x))
    }
}

/// Natural log for x > 0.
///
/// x = m * 2^k with m in [0.5, 2], then ln(m) = 2 * atanh((m-1)/(m+1)).
/// |z| <= 1/3 so the odd-power series converges to full precision quickly.
pub(crate) fn ln_decimal(x: Decimal) -> Decimal {
    debug_assert!(x > Decimal::ZERO, "ln of non-positive value");
    if x == Decimal::ONE {
        return Decimal::ZERO;
    }

    let two = dec!(2);
    let half = dec!(0.5);
    let mut m = x;
    let mut k: i64 = 0;
    while m > two {
        m /= two;
        k += 1;
    }
    while m < half {
        m *= two;
        k -= 1;
    }

    let z = (m - Decimal::ONE) / (m + Decimal::ONE);
    let z2 = z * z;
    let mut power = z;
    let mut series = Decimal::ZERO;
    for n in 0u32..60 {
        let term = power / Decimal::from(2 * n + 1);
        if term.is_zero() {
            break;
        }
        series += term;
        power *= z2;
    }

    Decimal::from(k) * LN_2 + two * series
}

/// Newton's method sqrt, iterated until the estimate stops moving.
pub(crate) fn sqrt_decimal(x: Decimal) -> Decimal {
    if x <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if x == Decimal::ONE {
        return Decimal::ONE;
    }
    let two = dec!(2);
    let mut guess = if x > Decimal::ONE { x / two } else { Decimal::ONE };
    for _ in 0..100 {
        let next = (guess + x / guess) / two;
        if next == guess {
            break;
        }
        guess = next;
    }
    guess
}

// ---------------------------------------------------------------------------
// Standard normal
// ---------------------------------------------------------------------------

/// Standard normal PDF: phi(x) = exp(-x^2/2) / sqrt(2*pi)
pub fn norm_pdf(x: Decimal) -> Decimal {
    if x.abs() > TAIL_CUTOFF {
        return Decimal::ZERO;
    }
    exp_decimal(-(x * x) / dec!(2)) * INV_SQRT_2PI
}

/// Standard normal CDF via the Abramowitz & Stegun erf approximation
/// (absolute error below 1.5e-7).
///
/// Phi(x) = (1 + erf(x / sqrt(2))) / 2 for x >= 0, and 1 - Phi(-x) below zero,
/// so Phi(x) + Phi(-x) == 1 holds exactly.
pub fn norm_cdf(x: Decimal) -> Decimal {
    if x < Decimal::ZERO {
        return Decimal::ONE - norm_cdf(-x);
    }
    if x > TAIL_CUTOFF {
        return Decimal::ONE;
    }

    let z = x / SQRT_2;
    let t = Decimal::ONE / (Decimal::ONE + AS_P * z);
    let poly = t * (AS_A1 + t * (AS_A2 + t * (AS_A3 + t * (AS_A4 + t * AS_A5))));
    let erf = Decimal::ONE - poly * exp_decimal(-(z * z));

    (Decimal::ONE + erf) / dec!(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Decimal, b: Decimal, tol: Decimal) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_exp_decimal_basic() {
        assert_eq!(exp_decimal(dec!(0)), dec!(1));
        assert!(approx_eq(exp_decimal(dec!(1)), dec!(2.718281828459), dec!(0.000000001)));
        assert!(approx_eq(exp_decimal(dec!(-3.5)), dec!(0.030197383422), dec!(0.000000001)));
    }

    #[test]
    fn test_exp_decimal_deep_negative_underflows_to_zero() {
        assert!(exp_decimal(dec!(-800)) < dec!(0.0000000001));
    }

    #[test]
    fn test_checked_exp_rejects_overflow() {
        assert!(checked_exp(dec!(90)).is_none());
        assert!(checked_exp(dec!(10)).is_some());
    }

    #[test]
    fn test_ln_decimal_basic() {
        assert_eq!(ln_decimal(dec!(1)), dec!(0));
        assert!(approx_eq(ln_decimal(dec!(2.718281828459045)), dec!(1), dec!(0.000000001)));
        assert!(approx_eq(ln_decimal(dec!(0.9584)), dec!(-0.04249005), dec!(0.0000001)));
        assert!(approx_eq(ln_decimal(dec!(1000)), dec!(6.907755279), dec!(0.000000001)));
    }

    #[test]
    fn test_sqrt_decimal_basic() {
        assert!(approx_eq(sqrt_decimal(dec!(4)), dec!(2), dec!(0.0000000001)));
        assert!(approx_eq(sqrt_decimal(dec!(0.0225)), dec!(0.15), dec!(0.0000000001)));
        assert!(approx_eq(sqrt_decimal(dec!(0.000000000001)), dec!(0.000001), dec!(0.0000000001)));
    }

    #[test]
    fn test_norm_cdf_reference_points() {
        assert!(approx_eq(norm_cdf(dec!(0)), dec!(0.5), dec!(0.0000001)));
        assert!(approx_eq(norm_cdf(dec!(1)), dec!(0.841344746), dec!(0.0000002)));
        assert!(approx_eq(norm_cdf(dec!(-1.96)), dec!(0.024997895), dec!(0.0000002)));
        assert_eq!(norm_cdf(dec!(50)), Decimal::ONE);
        assert_eq!(norm_cdf(dec!(-50)), Decimal::ZERO);
    }

    #[test]
    fn test_norm_cdf_symmetry_is_exact() {
        for x in [dec!(0.1), dec!(0.75), dec!(2.3), dec!(6)] {
            assert_eq!(norm_cdf(x) + norm_cdf(-x), Decimal::ONE);
        }
    }

    #[test]
    fn test_norm_pdf() {
        assert!(approx_eq(norm_pdf(dec!(0)), dec!(0.398942280), dec!(0.000000001)));
        assert_eq!(norm_pdf(dec!(0.5)), norm_pdf(dec!(-0.5)));
        assert_eq!(norm_pdf(dec!(1000000)), Decimal::ZERO);
    }
}
