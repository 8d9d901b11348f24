//! Command implementations, kept apart from argument parsing so they can be
//! tested without a process boundary.

use std::path::Path;

use anyhow::{Context, Result};
use paye_core::calculations::{EngineConfig, PayeComparison, PayeEngine};
use paye_core::{PersonalReliefFormula, RentReliefPolicy};
use paye_data::{EngineSettings, PayrollLoader};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::state::{CalculatorState, InputField};

/// Command-line settings that take precedence over the settings file.
#[derive(Debug, Clone, Default)]
pub struct EngineOverrides {
    pub personal_relief: Option<PersonalReliefFormula>,
    pub rent_relief_cap: Option<Decimal>,
}

/// Parses a `--cap-rent-relief` value. Unlike salary fields, a cap that
/// cannot be read is an error rather than zero.
pub fn parse_rent_relief_cap(s: &str) -> Result<Decimal, String> {
    let cleaned = s.trim().trim_start_matches('₦').replace(',', "");
    let cap: Decimal = cleaned
        .parse()
        .map_err(|_| format!("expected an amount such as 500000, got '{s}'"))?;
    if cap < Decimal::ZERO {
        return Err(format!("rent relief cap must be non-negative, got {cap}"));
    }
    Ok(cap)
}

/// Builds the engine from an optional settings file plus overrides.
pub fn build_engine(
    settings_path: Option<&Path>,
    overrides: &EngineOverrides,
) -> Result<PayeEngine> {
    let mut config = match settings_path {
        Some(path) => EngineSettings::load(path)
            .and_then(EngineSettings::into_engine_config)
            .with_context(|| format!("Failed to load settings from: {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(formula) = overrides.personal_relief {
        config.personal_relief = formula;
    }
    if let Some(cap) = overrides.rent_relief_cap {
        anyhow::ensure!(
            cap >= Decimal::ZERO,
            "rent relief cap must be non-negative, got {cap}"
        );
        config.rent_relief = RentReliefPolicy::Capped { cap };
    }

    debug!(
        personal_relief = config.personal_relief.as_str(),
        rent_relief = ?config.rent_relief,
        "engine configured"
    );
    Ok(PayeEngine::new(config))
}

/// Inputs a comparison starts from before edits are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Baseline {
    /// The sample salary with the default rent-relief claim.
    #[default]
    Sample,
    /// Every salary and deduction field at zero.
    Zero,
}

/// Runs a single comparison, starting from `baseline` and applying each
/// edit in order.
pub fn compare(
    engine: PayeEngine,
    baseline: Baseline,
    edits: &[(InputField, &str)],
) -> PayeComparison {
    let mut state = CalculatorState::new(engine);
    if baseline == Baseline::Zero {
        state.clear();
    }
    for (field, raw) in edits {
        state.set_field(*field, raw);
    }
    state.result().clone()
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub employee: String,
    pub result: PayeComparison,
}

/// Runs a comparison for every row of a payroll CSV.
pub fn batch(
    engine: &PayeEngine,
    payroll: &Path,
) -> Result<Vec<BatchEntry>> {
    let records = PayrollLoader::load_from_file(payroll)
        .with_context(|| format!("Failed to load payroll: {}", payroll.display()))?;
    info!("Loaded {} payroll records", records.len());

    Ok(records
        .into_iter()
        .map(|record| BatchEntry {
            result: engine.recompute(&record.salary, &record.deductions),
            employee: record.employee,
        })
        .collect())
}
