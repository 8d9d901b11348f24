//! Shared numeric helpers.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// Largest input amount (₦10²⁰) the engine accepts. Summing every salary
/// and deduction field, annualising and forming percentages all stay inside
/// `Decimal`'s range below this bound. Input layers map anything larger to
/// zero.
pub const MAX_INPUT_AMOUNT: Decimal =
    Decimal::from_parts(1_661_992_960, 1_808_227_885, 5, false, 0);

/// `value` when its magnitude is at most [`MAX_INPUT_AMOUNT`], otherwise
/// zero (logged at `warn`).
pub fn bounded_input(
    field: &str,
    value: Decimal,
) -> Decimal {
    if value.abs() > MAX_INPUT_AMOUNT {
        warn!(field, %value, "amount outside the supported range treated as 0");
        Decimal::ZERO
    } else {
        value
    }
}

/// Rounds to `dp` decimal places using half-up rounding (midpoints move away
/// from zero).
///
/// The engine itself never rounds; this is for callers presenting results.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(76520.768), 2), dec!(76520.77));
/// assert_eq!(round_half_up(dec!(45662.5), 0), dec!(45663));
/// assert_eq!(round_half_up(dec!(-123.455), 2), dec!(-123.46));
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole × 100`, or `None` when `whole` is zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::percentage;
///
/// assert_eq!(percentage(dec!(330000), dec!(3000000)), Some(dec!(11)));
/// assert_eq!(percentage(dec!(0), dec!(0)), None);
/// ```
pub fn percentage(
    part: Decimal,
    whole: Decimal,
) -> Option<Decimal> {
    part.checked_div(whole).map(|ratio| ratio * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn max_input_amount_is_ten_to_the_twentieth() {
        assert_eq!(MAX_INPUT_AMOUNT, dec!(100000000000000000000));
    }

    #[test]
    fn bounded_input_keeps_amounts_up_to_the_limit() {
        assert_eq!(bounded_input("basic", MAX_INPUT_AMOUNT), MAX_INPUT_AMOUNT);
        assert_eq!(bounded_input("basic", -MAX_INPUT_AMOUNT), -MAX_INPUT_AMOUNT);
        assert_eq!(bounded_input("basic", dec!(-5000)), dec!(-5000));
    }

    #[test]
    fn bounded_input_zeroes_amounts_past_the_limit() {
        assert_eq!(bounded_input("basic", Decimal::MAX), Decimal::ZERO);
        assert_eq!(bounded_input("nhf", Decimal::MIN), Decimal::ZERO);
        assert_eq!(bounded_input("other", dec!(1000000000000000000000)), Decimal::ZERO);
    }

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454), 2), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455), 2), dec!(123.46));
    }

    #[test]
    fn round_half_up_to_whole_units() {
        assert_eq!(round_half_up(dec!(81563.690666), 0), dec!(81564));
        assert_eq!(round_half_up(dec!(81563.49), 0), dec!(81563));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-0.5), 0), dec!(-1));
    }

    #[test]
    fn round_half_up_handles_zero() {
        assert_eq!(round_half_up(Decimal::ZERO, 2), Decimal::ZERO);
    }

    // =========================================================================
    // percentage tests
    // =========================================================================

    #[test]
    fn percentage_of_whole() {
        assert_eq!(percentage(dec!(25), dec!(200)), Some(dec!(12.5)));
    }

    #[test]
    fn percentage_of_zero_whole_is_none() {
        assert_eq!(percentage(dec!(25), Decimal::ZERO), None);
        assert_eq!(percentage(Decimal::ZERO, Decimal::ZERO), None);
    }

    #[test]
    fn percentage_allows_negative_parts() {
        assert_eq!(percentage(dec!(-10), dec!(40)), Some(dec!(-25)));
    }
}
