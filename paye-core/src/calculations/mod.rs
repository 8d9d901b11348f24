//! PAYE calculations for the old and new personal income tax regimes.
//!
//! Each stage lives in its own module and can be used on its own;
//! [`PayeEngine`] wires them together.

pub mod brackets;
pub mod common;
pub mod comparison;
pub mod engine;
pub mod income;
pub mod pension;
pub mod regime;

pub use brackets::{BracketAllocation, BracketContribution, BracketSchedule, BracketScheduleError};
pub use comparison::{ComparisonResult, compare};
pub use engine::{EngineConfig, PayeComparison, PayeEngine, PeriodTotals};
pub use income::IncomeSummary;
pub use pension::PensionContribution;
pub use regime::{RegimeEngine, RegimeReliefs, RegimeResult, ReliefStrategy};
