use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry of a progressive schedule.
///
/// Bounds are cumulative annual taxable income. `max_income` of `None` means
/// the bracket is unbounded above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub label: String,
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        label: impl Into<String>,
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            min_income,
            max_income,
            tax_rate,
        }
    }

    /// Portion of `taxable_income` that falls inside this bracket.
    ///
    /// An income exactly on `max_income` is attributed entirely to this
    /// bracket. Never negative.
    pub fn taxable_amount(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= self.min_income {
            return Decimal::ZERO;
        }
        let capped = match self.max_income {
            Some(max) => taxable_income.min(max),
            None => taxable_income,
        };
        (capped - self.min_income).max(Decimal::ZERO)
    }

    /// Whether `taxable_income` ends inside (or exactly on the top of) this
    /// bracket.
    pub fn contains_top_of(
        &self,
        taxable_income: Decimal,
    ) -> bool {
        self.max_income.is_none_or(|max| taxable_income <= max)
    }
}
