mod deductions;
mod regime;
mod relief_policy;
mod salary;
mod tax_bracket;

pub use deductions::DeductionInput;
pub use regime::Regime;
pub use relief_policy::{PersonalReliefFormula, RentReliefPolicy};
pub use salary::SalaryInput;
pub use tax_bracket::TaxBracket;
