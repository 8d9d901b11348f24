use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::bounded_input;

/// Annual deductions claimed by the employee, in Naira.
///
/// `rent_relief` is only consumed by the new-law regime; the other four
/// fields reduce taxable income under both regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DeductionInput {
    pub rent_relief: Decimal,
    /// National Housing Fund contribution.
    pub nhf: Decimal,
    /// National Health Insurance Scheme contribution.
    pub nhis: Decimal,
    pub life_insurance: Decimal,
    pub housing_loan_interest: Decimal,
}

impl DeductionInput {
    /// The claims the calculator starts out with: ₦300,000 rent relief and
    /// nothing else.
    pub fn default_claims() -> Self {
        Self {
            rent_relief: Decimal::from(300_000),
            ..Self::default()
        }
    }

    /// Copy with every claim past
    /// [`MAX_INPUT_AMOUNT`](crate::calculations::common::MAX_INPUT_AMOUNT)
    /// replaced by zero.
    pub fn within_input_range(&self) -> Self {
        Self {
            rent_relief: bounded_input("rent_relief", self.rent_relief),
            nhf: bounded_input("nhf", self.nhf),
            nhis: bounded_input("nhis", self.nhis),
            life_insurance: bounded_input("life_insurance", self.life_insurance),
            housing_loan_interest: bounded_input(
                "housing_loan_interest",
                self.housing_loan_interest,
            ),
        }
    }

    /// Sum of the deductions shared by both regimes (everything except rent
    /// relief).
    pub fn common_total(&self) -> Decimal {
        self.nhf + self.nhis + self.life_insurance + self.housing_loan_interest
    }
}
