//! Regime engines: relief computation followed by bracket allocation.
//!
//! Both regimes share the same shape:
//!
//! ```text
//! taxable income = annual gross - regime reliefs - annual pension
//!                  - NHF - NHIS - life insurance - housing loan interest
//! annual tax     = schedule.allocate(taxable income)
//! ```
//!
//! They differ only in the reliefs, captured by [`ReliefStrategy`]:
//!
//! | Regime  | Reliefs |
//! |---------|---------|
//! | Old law | personal relief (see [`PersonalReliefFormula`]) + CRA `max(₦200,000, 1% × gross)` |
//! | New law | rent relief (see [`RentReliefPolicy`]) |
//!
//! Taxable income is not floored at zero; a negative figure simply allocates
//! to zero tax.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::brackets::{BracketContribution, BracketSchedule};
use crate::calculations::common::percentage;
use crate::calculations::income::{IncomeSummary, MONTHS_PER_YEAR};
use crate::calculations::pension::PensionContribution;
use crate::{DeductionInput, PersonalReliefFormula, Regime, RentReliefPolicy};

/// Minimum consolidated relief allowance.
pub const CRA_FLOOR: Decimal = Decimal::from_parts(200_000, 0, 0, false, 0);

/// Share of gross income granted as consolidated relief when above the floor.
pub const CRA_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// How a regime reduces gross income before the pension and common
/// deductions are taken off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefStrategy {
    OldLaw {
        personal_relief: PersonalReliefFormula,
    },
    NewLaw {
        rent_relief: RentReliefPolicy,
    },
}

/// Reliefs granted by a regime, as reported alongside its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "regime", rename_all = "snake_case")]
pub enum RegimeReliefs {
    OldLaw {
        personal_relief: Decimal,
        consolidated_relief_allowance: Decimal,
        formula: PersonalReliefFormula,
    },
    NewLaw {
        rent_relief_claimed: Decimal,
        rent_relief_applied: Decimal,
    },
}

impl RegimeReliefs {
    /// Amount subtracted from gross income.
    pub fn total(&self) -> Decimal {
        match self {
            Self::OldLaw {
                personal_relief,
                consolidated_relief_allowance,
                ..
            } => personal_relief + consolidated_relief_allowance,
            Self::NewLaw {
                rent_relief_applied,
                ..
            } => *rent_relief_applied,
        }
    }
}

impl ReliefStrategy {
    pub fn regime(&self) -> Regime {
        match self {
            Self::OldLaw { .. } => Regime::OldLaw,
            Self::NewLaw { .. } => Regime::NewLaw,
        }
    }

    pub fn reliefs(
        &self,
        income: &IncomeSummary,
        deductions: &DeductionInput,
    ) -> RegimeReliefs {
        match *self {
            Self::OldLaw { personal_relief } => RegimeReliefs::OldLaw {
                personal_relief: personal_relief.personal_relief(income.annual_gross),
                consolidated_relief_allowance: consolidated_relief_allowance(income.annual_gross),
                formula: personal_relief,
            },
            Self::NewLaw { rent_relief } => {
                let applied = rent_relief.apply(deductions.rent_relief);
                if applied != deductions.rent_relief {
                    debug!(
                        claimed = %deductions.rent_relief,
                        applied = %applied,
                        "rent relief clamped to cap"
                    );
                }
                RegimeReliefs::NewLaw {
                    rent_relief_claimed: deductions.rent_relief,
                    rent_relief_applied: applied,
                }
            }
        }
    }
}

/// `max(₦200,000, 1% × annual gross)`
pub fn consolidated_relief_allowance(annual_gross: Decimal) -> Decimal {
    CRA_FLOOR.max(annual_gross * CRA_RATE)
}

/// Outcome of running one regime over a salary and set of deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub regime: Regime,
    pub reliefs: RegimeReliefs,
    /// May be negative when reliefs and deductions exceed gross income.
    pub taxable_income: Decimal,
    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,
    /// Monthly gross less monthly pension and monthly tax.
    pub net_pay: Decimal,
    /// `annual_tax / annual_gross × 100`; `None` when annual gross is zero.
    pub effective_rate_percent: Option<Decimal>,
    pub breakdown: Vec<BracketContribution>,
}

/// One regime: a relief strategy paired with the schedule it taxes against.
#[derive(Debug, Clone, Copy)]
pub struct RegimeEngine<'a> {
    schedule: &'a BracketSchedule,
    relief: ReliefStrategy,
}

impl<'a> RegimeEngine<'a> {
    pub fn new(
        schedule: &'a BracketSchedule,
        relief: ReliefStrategy,
    ) -> Self {
        Self { schedule, relief }
    }

    pub fn old_law(
        schedule: &'a BracketSchedule,
        personal_relief: PersonalReliefFormula,
    ) -> Self {
        Self::new(schedule, ReliefStrategy::OldLaw { personal_relief })
    }

    pub fn new_law(
        schedule: &'a BracketSchedule,
        rent_relief: RentReliefPolicy,
    ) -> Self {
        Self::new(schedule, ReliefStrategy::NewLaw { rent_relief })
    }

    pub fn regime(&self) -> Regime {
        self.relief.regime()
    }

    /// Derives taxable income for this regime and allocates it across the
    /// schedule. Never fails: odd inputs (negative amounts, zero gross)
    /// flow through the arithmetic into the result.
    pub fn calculate(
        &self,
        income: &IncomeSummary,
        pension: &PensionContribution,
        deductions: &DeductionInput,
    ) -> RegimeResult {
        let reliefs = self.relief.reliefs(income, deductions);
        let taxable_income = self.taxable_income(income, pension, deductions, &reliefs);
        let allocation = self.schedule.allocate(taxable_income);

        let annual_tax = allocation.total_tax;
        let monthly_tax = annual_tax / MONTHS_PER_YEAR;
        let net_pay = income.monthly_gross - pension.monthly - monthly_tax;

        RegimeResult {
            regime: self.regime(),
            reliefs,
            taxable_income,
            annual_tax,
            monthly_tax,
            net_pay,
            effective_rate_percent: percentage(annual_tax, income.annual_gross),
            breakdown: allocation.breakdown,
        }
    }

    fn taxable_income(
        &self,
        income: &IncomeSummary,
        pension: &PensionContribution,
        deductions: &DeductionInput,
        reliefs: &RegimeReliefs,
    ) -> Decimal {
        income.annual_gross - reliefs.total() - pension.annual - deductions.common_total()
    }
}
