//! Calculator state owned by the presentation layer.
//!
//! The engine is pure; this is the one place that holds mutable input. Every
//! edit coerces the raw text, replaces the affected field and recomputes the
//! full comparison.

use paye_core::calculations::{PayeComparison, PayeEngine};
use paye_core::{DeductionInput, SalaryInput};
use paye_data::coerce_amount;

/// An editable input on the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Basic,
    Housing,
    Transport,
    Other,
    RentRelief,
    Nhf,
    Nhis,
    LifeInsurance,
    HousingLoanInterest,
}

#[derive(Debug, Clone)]
pub struct CalculatorState {
    engine: PayeEngine,
    salary: SalaryInput,
    deductions: DeductionInput,
    result: PayeComparison,
}

impl CalculatorState {
    /// Starts from the sample salary and the default rent-relief claim.
    pub fn new(engine: PayeEngine) -> Self {
        Self::with_inputs(engine, SalaryInput::sample(), DeductionInput::default_claims())
    }

    pub fn with_inputs(
        engine: PayeEngine,
        salary: SalaryInput,
        deductions: DeductionInput,
    ) -> Self {
        let result = engine.recompute(&salary, &deductions);
        Self {
            engine,
            salary,
            deductions,
            result,
        }
    }

    pub fn salary(&self) -> &SalaryInput {
        &self.salary
    }

    pub fn deductions(&self) -> &DeductionInput {
        &self.deductions
    }

    pub fn result(&self) -> &PayeComparison {
        &self.result
    }

    /// Applies a raw user edit. Unreadable text sets the field to zero.
    pub fn set_field(
        &mut self,
        field: InputField,
        raw: &str,
    ) {
        let value = coerce_amount(raw);
        let slot = match field {
            InputField::Basic => &mut self.salary.basic,
            InputField::Housing => &mut self.salary.housing,
            InputField::Transport => &mut self.salary.transport,
            InputField::Other => &mut self.salary.other,
            InputField::RentRelief => &mut self.deductions.rent_relief,
            InputField::Nhf => &mut self.deductions.nhf,
            InputField::Nhis => &mut self.deductions.nhis,
            InputField::LifeInsurance => &mut self.deductions.life_insurance,
            InputField::HousingLoanInterest => &mut self.deductions.housing_loan_interest,
        };
        *slot = value;
        self.result = self.engine.recompute(&self.salary, &self.deductions);
    }

    /// Back to all-zero inputs.
    pub fn clear(&mut self) {
        self.salary = SalaryInput::default();
        self.deductions = DeductionInput::default();
        self.result = self.engine.recompute(&self.salary, &self.deductions);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_state_is_computed_immediately() {
        let state = CalculatorState::new(PayeEngine::default());

        assert_eq!(state.result().annual.gross, dec!(7116000));
        assert_eq!(state.deductions().rent_relief, dec!(300000));
    }

    #[test]
    fn set_field_recomputes() {
        let mut state = CalculatorState::new(PayeEngine::default());

        state.set_field(InputField::Other, "1,022,220");

        assert_eq!(state.salary().other, dec!(1022220));
        assert_eq!(state.result().monthly.gross, dec!(1593000));
    }

    #[test]
    fn set_field_coerces_garbage_to_zero() {
        let mut state = CalculatorState::new(PayeEngine::default());

        state.set_field(InputField::RentRelief, "three hundred");

        assert_eq!(state.deductions().rent_relief, Decimal::ZERO);
        assert_eq!(state.result().new_law.taxable_income, dec!(6568051.2));
    }

    #[test]
    fn set_field_out_of_range_amounts_are_zero() {
        let mut state = CalculatorState::new(PayeEngine::default());

        state.set_field(InputField::Other, "79228162514264337593543950335");
        state.set_field(InputField::Basic, "1e28");
        state.set_field(InputField::Nhis, "-1e28");

        assert_eq!(state.salary().other, Decimal::ZERO);
        assert_eq!(state.salary().basic, Decimal::ZERO);
        assert_eq!(state.deductions().nhis, Decimal::ZERO);
        assert_eq!(state.result().monthly.gross, dec!(317100));
    }

    #[test]
    fn set_field_accepts_the_largest_supported_amount() {
        let mut state = CalculatorState::new(PayeEngine::default());

        state.set_field(InputField::Other, "1e20");

        assert_eq!(state.result().annual.gross, dec!(1200000000000000006849360));
        assert!(state.result().new_law.annual_tax > Decimal::ZERO);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut state = CalculatorState::new(PayeEngine::default());

        state.clear();

        assert_eq!(state.result().annual.gross, Decimal::ZERO);
        assert_eq!(state.result().old_law.effective_rate_percent, None);
    }
}
