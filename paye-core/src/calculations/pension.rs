//! Statutory pension contribution.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::income::MONTHS_PER_YEAR;

/// Employee contribution rate applied to pensionable pay.
pub const PENSION_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionContribution {
    pub annual: Decimal,
    pub monthly: Decimal,
}

impl PensionContribution {
    pub fn from_pensionable(pensionable_annual: Decimal) -> Self {
        let annual = pensionable_annual * PENSION_RATE;

        Self {
            annual,
            monthly: annual / MONTHS_PER_YEAR,
        }
    }
}
