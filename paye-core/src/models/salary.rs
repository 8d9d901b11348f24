use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::bounded_input;

/// Monthly salary components, in Naira.
///
/// Only `basic`, `housing` and `transport` are pensionable; `other` counts
/// towards gross pay but not towards the pension base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SalaryInput {
    pub basic: Decimal,
    pub housing: Decimal,
    pub transport: Decimal,
    pub other: Decimal,
}

impl SalaryInput {
    /// The salary the calculator starts out with.
    pub fn sample() -> Self {
        Self {
            basic: Decimal::from(253_680),
            housing: Decimal::from(190_260),
            transport: Decimal::from(126_840),
            other: Decimal::from(22_220),
        }
    }

    /// Copy with every component past
    /// [`MAX_INPUT_AMOUNT`](crate::calculations::common::MAX_INPUT_AMOUNT)
    /// replaced by zero.
    pub fn within_input_range(&self) -> Self {
        Self {
            basic: bounded_input("basic", self.basic),
            housing: bounded_input("housing", self.housing),
            transport: bounded_input("transport", self.transport),
            other: bounded_input("other", self.other),
        }
    }

    pub fn monthly_gross(&self) -> Decimal {
        self.basic + self.housing + self.transport + self.other
    }

    pub fn monthly_pensionable(&self) -> Decimal {
        self.basic + self.housing + self.transport
    }
}
