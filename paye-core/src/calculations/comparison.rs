//! Old law versus new law.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::regime::RegimeResult;

/// Differences between the two regimes.
///
/// Tax and rate deltas are old minus new, so a positive value is a saving
/// under the new law. The net-pay delta is new minus old, so a positive
/// value is a pay rise under the new law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub annual_tax_delta: Decimal,
    pub monthly_tax_delta: Decimal,
    /// `None` when either effective rate is undefined.
    pub effective_rate_delta: Option<Decimal>,
    pub monthly_net_pay_delta: Decimal,
}

impl ComparisonResult {
    pub fn new_law_saves(&self) -> bool {
        self.annual_tax_delta > Decimal::ZERO
    }
}

pub fn compare(
    old_law: &RegimeResult,
    new_law: &RegimeResult,
) -> ComparisonResult {
    let effective_rate_delta = old_law
        .effective_rate_percent
        .zip(new_law.effective_rate_percent)
        .map(|(old, new)| old - new);

    ComparisonResult {
        annual_tax_delta: old_law.annual_tax - new_law.annual_tax,
        monthly_tax_delta: old_law.monthly_tax - new_law.monthly_tax,
        effective_rate_delta,
        monthly_net_pay_delta: new_law.net_pay - old_law.net_pay,
    }
}
