//! Boundary layer between raw user input and the PAYE engine.
//!
//! Nothing in here computes tax. It turns text (form fields, CSV cells,
//! TOML settings) into the typed inputs `paye-core` expects.

pub mod amount;
pub mod payroll_loader;
pub mod schedule_loader;
pub mod settings;

pub use amount::coerce_amount;
pub use payroll_loader::{PayrollLoadError, PayrollLoader, PayrollRecord};
pub use schedule_loader::{ScheduleLoadError, ScheduleLoader, ScheduleRecord, ScheduleSet};
pub use settings::{EngineSettings, RentReliefSettings, SettingsError};
