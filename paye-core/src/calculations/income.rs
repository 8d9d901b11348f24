//! Monthly salary to annual gross and pension base.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::SalaryInput;

pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Gross pay figures derived from a [`SalaryInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSummary {
    pub monthly_gross: Decimal,
    pub annual_gross: Decimal,
    /// Annual basic + housing + transport. `other` is not pensionable.
    pub pensionable_annual: Decimal,
}

impl IncomeSummary {
    pub fn from_salary(salary: &SalaryInput) -> Self {
        let monthly_gross = salary.monthly_gross();

        Self {
            monthly_gross,
            annual_gross: monthly_gross * MONTHS_PER_YEAR,
            pensionable_annual: salary.monthly_pensionable() * MONTHS_PER_YEAR,
        }
    }
}
