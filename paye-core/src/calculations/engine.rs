//! Full recomputation: salary and deductions in, side-by-side comparison out.
//!
//! ```text
//! SalaryInput ─▶ IncomeSummary ─▶ PensionContribution
//!                      │                   │
//!                      ├──▶ old-law RegimeEngine ──┐
//!                      └──▶ new-law RegimeEngine ──┴─▶ compare ─▶ PayeComparison
//! ```
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::calculations::PayeEngine;
//! use paye_core::{DeductionInput, SalaryInput};
//!
//! let engine = PayeEngine::default();
//! let result = engine.recompute(&SalaryInput::sample(), &DeductionInput::default_claims());
//!
//! assert_eq!(result.annual.gross, dec!(7116000));
//! assert_eq!(result.new_law.annual_tax, dec!(918249.216));
//! assert_eq!(result.old_law.annual_tax, dec!(978764.288));
//! assert!(result.savings.new_law_saves());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::brackets::BracketSchedule;
use crate::calculations::common::MAX_INPUT_AMOUNT;
use crate::calculations::comparison::{ComparisonResult, compare};
use crate::calculations::income::IncomeSummary;
use crate::calculations::pension::PensionContribution;
use crate::calculations::regime::{RegimeEngine, RegimeResult};
use crate::{DeductionInput, PersonalReliefFormula, RentReliefPolicy, SalaryInput};

/// Everything that can vary between runs of the engine.
///
/// `Default` gives the statutory schedules, the 20%-of-gross personal relief
/// and an advisory (unenforced) rent-relief cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub personal_relief: PersonalReliefFormula,
    pub rent_relief: RentReliefPolicy,
    pub old_law_schedule: BracketSchedule,
    pub new_law_schedule: BracketSchedule,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            personal_relief: PersonalReliefFormula::default(),
            rent_relief: RentReliefPolicy::default(),
            old_law_schedule: BracketSchedule::old_law(),
            new_law_schedule: BracketSchedule::new_law(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub gross: Decimal,
    pub pension: Decimal,
}

/// The record handed to presentation after every recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeComparison {
    pub monthly: PeriodTotals,
    pub annual: PeriodTotals,
    pub pensionable_annual: Decimal,
    pub old_law: RegimeResult,
    pub new_law: RegimeResult,
    pub savings: ComparisonResult,
}

/// Stateless calculator. Cheap to share; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct PayeEngine {
    config: EngineConfig,
}

impl PayeEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn old_law_engine(&self) -> RegimeEngine<'_> {
        RegimeEngine::old_law(&self.config.old_law_schedule, self.config.personal_relief)
    }

    pub fn new_law_engine(&self) -> RegimeEngine<'_> {
        RegimeEngine::new_law(&self.config.new_law_schedule, self.config.rent_relief)
    }

    /// Runs both regimes over the inputs and compares them.
    ///
    /// Never fails. Negative amounts, zero gross and deductions larger than
    /// gross all produce a complete record; see
    /// [`RegimeResult::effective_rate_percent`] for the zero-gross case.
    /// Amounts whose magnitude exceeds [`MAX_INPUT_AMOUNT`] are taken as zero.
    pub fn recompute(
        &self,
        salary: &SalaryInput,
        deductions: &DeductionInput,
    ) -> PayeComparison {
        let salary = salary.within_input_range();
        let deductions = &deductions.within_input_range();

        let income = IncomeSummary::from_salary(&salary);
        let pension = PensionContribution::from_pensionable(income.pensionable_annual);

        let old_law = self.old_law_engine().calculate(&income, &pension, deductions);
        let new_law = self.new_law_engine().calculate(&income, &pension, deductions);
        let savings = compare(&old_law, &new_law);

        if income.annual_gross.is_zero() {
            warn!("annual gross is zero; effective rates are undefined");
        }
        debug!(
            annual_gross = %income.annual_gross,
            old_law_tax = %old_law.annual_tax,
            new_law_tax = %new_law.annual_tax,
            savings = %savings.annual_tax_delta,
            "recomputed PAYE comparison"
        );

        PayeComparison {
            monthly: PeriodTotals {
                gross: income.monthly_gross,
                pension: pension.monthly,
            },
            annual: PeriodTotals {
                gross: income.annual_gross,
                pension: pension.annual,
            },
            pensionable_annual: income.pensionable_annual,
            old_law,
            new_law,
            savings,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::Regime;

    fn salary(
        basic: Decimal,
        housing: Decimal,
        transport: Decimal,
        other: Decimal,
    ) -> SalaryInput {
        SalaryInput {
            basic,
            housing,
            transport,
            other,
        }
    }

    // =========================================================================
    // scenario tests
    // =========================================================================

    #[test]
    fn recompute_sample_salary_favours_new_law() {
        let engine = PayeEngine::default();

        let result = engine.recompute(&SalaryInput::sample(), &DeductionInput::default_claims());

        assert_eq!(result.monthly.gross, dec!(593000));
        assert_eq!(result.annual.gross, dec!(7116000));
        assert_eq!(result.pensionable_annual, dec!(6849360));
        assert_eq!(result.annual.pension, dec!(547948.8));
        assert_eq!(result.monthly.pension, dec!(45662.4));

        assert_eq!(result.new_law.taxable_income, dec!(6268051.2));
        assert_eq!(result.new_law.annual_tax, dec!(918249.216));
        assert_eq!(result.old_law.taxable_income, dec!(4944851.2));
        assert_eq!(result.old_law.annual_tax, dec!(978764.288));

        assert!(result.new_law.annual_tax >= Decimal::ZERO);
        assert!(result.new_law.annual_tax < result.old_law.annual_tax);
        assert_eq!(result.savings.annual_tax_delta, dec!(60515.072));
    }

    #[test]
    fn recompute_sample_salary_with_fixed_add_on_still_favours_new_law() {
        let engine = PayeEngine::new(EngineConfig {
            personal_relief: PersonalReliefFormula::GrossFractionPlusFixed,
            ..EngineConfig::default()
        });

        let result = engine.recompute(&SalaryInput::sample(), &DeductionInput::default_claims());

        assert_eq!(result.old_law.annual_tax, dec!(930764.288));
        assert_eq!(result.savings.annual_tax_delta, dec!(12515.072));
    }

    #[test]
    fn recompute_zero_salary() {
        let engine = PayeEngine::default();

        let result = engine.recompute(&SalaryInput::default(), &DeductionInput::default_claims());

        assert_eq!(result.monthly.gross, Decimal::ZERO);
        assert_eq!(result.annual.gross, Decimal::ZERO);
        assert_eq!(result.annual.pension, Decimal::ZERO);
        for regime in [&result.old_law, &result.new_law] {
            assert_eq!(regime.annual_tax, Decimal::ZERO);
            assert!(regime.breakdown.iter().all(|c| c.taxable_amount.is_zero() && c.tax.is_zero()));
            assert_eq!(regime.effective_rate_percent, None);
        }
        assert_eq!(result.savings.effective_rate_delta, None);
    }

    #[test]
    fn recompute_new_law_boundary_income() {
        let engine = PayeEngine::default();
        let salary = salary(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, dec!(250000));

        let result = engine.recompute(&salary, &DeductionInput::default());

        assert_eq!(result.new_law.taxable_income, dec!(3000000));
        assert_eq!(result.new_law.breakdown[1].tax, dec!(2200000) * dec!(0.15));
        assert_eq!(result.new_law.breakdown[2].taxable_amount, Decimal::ZERO);
        assert_eq!(result.new_law.breakdown[2].tax, Decimal::ZERO);
    }

    #[test]
    fn recompute_very_high_salary() {
        let engine = PayeEngine::default();
        let salary = salary(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, dec!(10000000));

        let result = engine.recompute(&salary, &DeductionInput::default());

        assert_eq!(result.new_law.taxable_income, dec!(120000000));
        let top = &result.new_law.breakdown[5];
        assert_eq!(top.taxable_amount, dec!(70000000));
        assert_eq!(top.tax, dec!(17500000));
        assert_eq!(result.new_law.annual_tax, dec!(27840000));
        assert_eq!(result.new_law.effective_rate_percent, Some(dec!(23.2)));
    }

    #[test]
    fn recompute_out_of_range_amounts_count_as_zero() {
        let engine = PayeEngine::default();
        let huge = SalaryInput {
            basic: Decimal::MAX,
            other: dec!(1000000000000000000000),
            ..SalaryInput::sample()
        };
        let claims = DeductionInput {
            nhf: Decimal::MIN,
            ..DeductionInput::default_claims()
        };

        let result = engine.recompute(&huge, &claims);
        let expected = engine.recompute(
            &SalaryInput {
                basic: Decimal::ZERO,
                other: Decimal::ZERO,
                ..SalaryInput::sample()
            },
            &DeductionInput::default_claims(),
        );

        assert_eq!(result, expected);
    }

    #[test]
    fn recompute_largest_accepted_amounts_do_not_overflow() {
        let engine = PayeEngine::default();
        let salary = salary(MAX_INPUT_AMOUNT, MAX_INPUT_AMOUNT, MAX_INPUT_AMOUNT, MAX_INPUT_AMOUNT);
        let deductions = DeductionInput {
            rent_relief: -MAX_INPUT_AMOUNT,
            nhf: -MAX_INPUT_AMOUNT,
            nhis: -MAX_INPUT_AMOUNT,
            life_insurance: -MAX_INPUT_AMOUNT,
            housing_loan_interest: -MAX_INPUT_AMOUNT,
        };

        let result = engine.recompute(&salary, &deductions);

        assert_eq!(result.annual.gross, MAX_INPUT_AMOUNT * dec!(48));
        assert!(result.new_law.annual_tax > Decimal::ZERO);
        assert!(result.old_law.effective_rate_percent.is_some());
    }

    #[test]
    fn recompute_capped_rent_relief() {
        let engine = PayeEngine::new(EngineConfig {
            rent_relief: RentReliefPolicy::statutory_cap(),
            ..EngineConfig::default()
        });
        let deductions = DeductionInput {
            rent_relief: dec!(2000000),
            ..DeductionInput::default()
        };

        let capped = engine.recompute(&SalaryInput::sample(), &deductions);
        let at_cap = engine.recompute(
            &SalaryInput::sample(),
            &DeductionInput {
                rent_relief: dec!(500000),
                ..DeductionInput::default()
            },
        );

        assert_eq!(capped.new_law.annual_tax, at_cap.new_law.annual_tax);
    }

    #[test]
    fn recompute_is_idempotent() {
        let engine = PayeEngine::default();

        let first = engine.recompute(&SalaryInput::sample(), &DeductionInput::default_claims());
        let second = engine.recompute(&SalaryInput::sample(), &DeductionInput::default_claims());

        assert_eq!(first, second);
    }

    #[test]
    fn recompute_results_carry_their_regime() {
        let result = PayeEngine::default()
            .recompute(&SalaryInput::sample(), &DeductionInput::default_claims());

        assert_eq!(result.old_law.regime, Regime::OldLaw);
        assert_eq!(result.new_law.regime, Regime::NewLaw);
    }

    #[test]
    fn recompute_serializes_to_json() {
        let result = PayeEngine::default()
            .recompute(&SalaryInput::default(), &DeductionInput::default());

        let json = serde_json::to_value(&result).unwrap();

        assert!(json["old_law"]["effective_rate_percent"].is_null());
        assert_eq!(json["old_law"]["reliefs"]["regime"], "old_law");
        assert_eq!(json["new_law"]["reliefs"]["regime"], "new_law");
    }

    // =========================================================================
    // property tests
    // =========================================================================

    proptest! {
        #[test]
        fn prop_savings_identities_hold(
            basic in 0i64..5_000_000,
            housing in 0i64..2_000_000,
            transport in 0i64..1_000_000,
            other in 0i64..1_000_000,
            rent_relief in 0i64..1_000_000,
        ) {
            let salary = salary(
                Decimal::from(basic),
                Decimal::from(housing),
                Decimal::from(transport),
                Decimal::from(other),
            );
            let deductions = DeductionInput {
                rent_relief: Decimal::from(rent_relief),
                ..DeductionInput::default()
            };

            let result = PayeEngine::default().recompute(&salary, &deductions);

            prop_assert_eq!(
                result.savings.annual_tax_delta,
                result.old_law.annual_tax - result.new_law.annual_tax
            );
            prop_assert_eq!(
                result.savings.monthly_net_pay_delta,
                result.new_law.net_pay - result.old_law.net_pay
            );
            prop_assert!(result.old_law.annual_tax >= Decimal::ZERO);
            prop_assert!(result.new_law.annual_tax >= Decimal::ZERO);
        }

        #[test]
        fn prop_more_deductions_never_raise_tax(
            basic in 0i64..5_000_000,
            nhf in 0i64..2_000_000,
            extra in 0i64..2_000_000,
            field in 0usize..5,
        ) {
            let salary = salary(Decimal::from(basic), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
            let base = DeductionInput {
                nhf: Decimal::from(nhf),
                ..DeductionInput::default()
            };
            let mut more = base;
            let extra = Decimal::from(extra);
            match field {
                0 => more.rent_relief += extra,
                1 => more.nhf += extra,
                2 => more.nhis += extra,
                3 => more.life_insurance += extra,
                _ => more.housing_loan_interest += extra,
            }
            let engine = PayeEngine::default();

            let before = engine.recompute(&salary, &base);
            let after = engine.recompute(&salary, &more);

            prop_assert!(after.old_law.annual_tax <= before.old_law.annual_tax);
            prop_assert!(after.new_law.annual_tax <= before.new_law.annual_tax);
        }
    }
}
