//! Progressive bracket allocation.
//!
//! A [`BracketSchedule`] is an ordered, contiguous list of [`TaxBracket`]s
//! whose last entry is unbounded. Allocation splits a taxable-income figure
//! into the slice falling inside each bracket and taxes each slice at that
//! bracket's marginal rate:
//!
//! ```text
//! taxable_in_bracket = max(0, min(T, max_income) - min_income)
//! tax_in_bracket     = taxable_in_bracket × tax_rate
//! ```
//!
//! An income sitting exactly on a boundary belongs to the lower bracket.
//! Incomes at or below zero produce zero tax.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::calculations::BracketSchedule;
//!
//! let schedule = BracketSchedule::new_law();
//! let allocation = schedule.allocate(dec!(3000000));
//!
//! assert_eq!(allocation.total_tax, dec!(330000));
//! assert_eq!(allocation.breakdown[1].taxable_amount, dec!(2200000));
//! assert_eq!(allocation.breakdown[2].taxable_amount, dec!(0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TaxBracket;

/// Reasons a list of brackets cannot form a schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketScheduleError {
    #[error("no tax brackets provided")]
    NoTaxBrackets,

    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotAtZero(Decimal),

    #[error("bracket {index} starts at {found} but the previous bracket ends at {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {index} has an upper bound {max} not above its lower bound {min}")]
    EmptyRange {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeLast { index: usize },

    #[error("last bracket must be unbounded")]
    LastBracketBounded,

    #[error("bracket {index} has rate {rate}; rates must be between 0 and 1")]
    InvalidRate { index: usize, rate: Decimal },
}

/// The part of a taxable income that fell into one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketContribution {
    pub label: String,
    pub taxable_amount: Decimal,
    pub tax: Decimal,
}

/// Result of spreading a taxable income over a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketAllocation {
    /// One entry per schedule bracket, in schedule order.
    pub breakdown: Vec<BracketContribution>,
    pub total_tax: Decimal,
}

/// A validated progressive schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Builds a schedule after checking that the brackets start at zero, are
    /// contiguous and ascending, end in a single unbounded bracket, and carry
    /// rates in `[0, 1]`.
    ///
    /// Rates are not required to increase from one bracket to the next.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketScheduleError> {
        let first = brackets.first().ok_or(BracketScheduleError::NoTaxBrackets)?;
        if !first.min_income.is_zero() {
            return Err(BracketScheduleError::FirstBracketNotAtZero(first.min_income));
        }

        let last_index = brackets.len() - 1;
        let mut previous_max = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return Err(BracketScheduleError::InvalidRate {
                    index,
                    rate: bracket.tax_rate,
                });
            }

            if bracket.min_income != previous_max {
                return Err(BracketScheduleError::NotContiguous {
                    index,
                    expected: previous_max,
                    found: bracket.min_income,
                });
            }

            match bracket.max_income {
                Some(_) if index == last_index => {
                    return Err(BracketScheduleError::LastBracketBounded);
                }
                Some(max) if max <= bracket.min_income => {
                    return Err(BracketScheduleError::EmptyRange {
                        index,
                        min: bracket.min_income,
                        max,
                    });
                }
                Some(max) => previous_max = max,
                None if index != last_index => {
                    return Err(BracketScheduleError::UnboundedBeforeLast { index });
                }
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    /// Old-law (PITA) schedule: 7% up to ₦300,000 rising to 24% above
    /// ₦3,200,000.
    pub fn old_law() -> Self {
        Self::statutory(&[
            ("First ₦300,000 @ 7%", Some(300_000), 7),
            ("Next ₦300,000 @ 11%", Some(600_000), 11),
            ("Next ₦500,000 @ 15%", Some(1_100_000), 15),
            ("Next ₦500,000 @ 19%", Some(1_600_000), 19),
            ("Next ₦1,600,000 @ 21%", Some(3_200_000), 21),
            ("Above ₦3,200,000 @ 24%", None, 24),
        ])
    }

    /// New-law schedule: the first ₦800,000 is tax free, rising to 25% above
    /// ₦50,000,000.
    pub fn new_law() -> Self {
        Self::statutory(&[
            ("First ₦800,000 @ 0%", Some(800_000), 0),
            ("Next ₦2,200,000 @ 15%", Some(3_000_000), 15),
            ("Next ₦12,000,000 @ 18%", Some(15_000_000), 18),
            ("Next ₦10,000,000 @ 21%", Some(25_000_000), 21),
            ("Next ₦25,000,000 @ 23%", Some(50_000_000), 23),
            ("Above ₦50,000,000 @ 25%", None, 25),
        ])
    }

    /// Builds one of the built-in schedules from `(label, upper bound, rate
    /// percent)` tiers. The tiers are known to be valid, so validation is
    /// skipped; `statutory_schedules_validate` keeps that honest.
    fn statutory(tiers: &[(&str, Option<i64>, i64)]) -> Self {
        let mut min_income = Decimal::ZERO;
        let brackets = tiers
            .iter()
            .map(|&(label, max, rate_percent)| {
                let max_income = max.map(Decimal::from);
                let bracket = TaxBracket::new(
                    label,
                    min_income,
                    max_income,
                    Decimal::new(rate_percent, 2),
                );
                if let Some(max) = max_income {
                    min_income = max;
                }
                bracket
            })
            .collect();

        Self { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always false; a schedule holds at least one bracket.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Spreads `taxable_income` over the schedule.
    ///
    /// Brackets above the one that contains `taxable_income` contribute zero
    /// and are not evaluated. The breakdown still lists every bracket so its
    /// shape never depends on the income.
    pub fn allocate(
        &self,
        taxable_income: Decimal,
    ) -> BracketAllocation {
        let mut breakdown = Vec::with_capacity(self.brackets.len());
        let mut total_tax = Decimal::ZERO;
        let mut reached_top = false;

        for bracket in &self.brackets {
            let taxable_amount = if reached_top {
                Decimal::ZERO
            } else {
                bracket.taxable_amount(taxable_income)
            };
            let tax = taxable_amount * bracket.tax_rate;
            total_tax += tax;
            reached_top = reached_top || bracket.contains_top_of(taxable_income);

            breakdown.push(BracketContribution {
                label: bracket.label.clone(),
                taxable_amount,
                tax,
            });
        }

        BracketAllocation {
            breakdown,
            total_tax,
        }
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketSchedule {
    type Error = BracketScheduleError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketSchedule> for Vec<TaxBracket> {
    fn from(schedule: BracketSchedule) -> Self {
        schedule.brackets
    }
}
