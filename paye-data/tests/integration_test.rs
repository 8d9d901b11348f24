//! Integration tests that drive the engine from the fixture files in
//! `test-data/`.

use std::path::{Path, PathBuf};

use paye_core::calculations::{BracketSchedule, EngineConfig, PayeEngine};
use paye_core::{PersonalReliefFormula, Regime, RentReliefPolicy};
use paye_data::{EngineSettings, PayrollLoader, ScheduleLoader, SettingsError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

#[test]
fn statutory_schedule_file_matches_built_in_schedules() {
    let set = ScheduleLoader::load_from_file(&fixture("statutory_schedules.csv"))
        .expect("fixture should load");

    assert_eq!(set.old_law, Some(BracketSchedule::old_law()));
    assert_eq!(set.new_law, Some(BracketSchedule::new_law()));
}

#[test]
fn sample_payroll_loads_all_rows() {
    let records =
        PayrollLoader::load_from_file(&fixture("sample_payroll.csv")).expect("fixture should load");

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].employee, "ada");
    assert_eq!(records[0].deductions.rent_relief, dec!(300000));
    assert_eq!(records[3].salary.other, dec!(10000000));
}

#[test]
fn sample_payroll_through_default_engine() {
    let records = PayrollLoader::load_from_file(&fixture("sample_payroll.csv")).unwrap();
    let engine = PayeEngine::default();

    let results: Vec<_> = records
        .iter()
        .map(|r| engine.recompute(&r.salary, &r.deductions))
        .collect();

    // ada: the calculator's sample salary
    assert_eq!(results[0].new_law.annual_tax, dec!(918249.216));
    assert_eq!(results[0].old_law.annual_tax, dec!(978764.288));

    // bola: nothing earned
    assert_eq!(results[1].new_law.annual_tax, Decimal::ZERO);
    assert_eq!(results[1].new_law.effective_rate_percent, None);

    // chidi: new-law taxable income lands on the ₦3,000,000 boundary
    assert_eq!(results[2].new_law.taxable_income, dec!(3000000));
    assert_eq!(results[2].new_law.annual_tax, dec!(330000));

    // dayo: well into the top bracket
    assert_eq!(results[3].new_law.breakdown[5].tax, dec!(17500000));
}

#[test]
fn settings_file_resolves_relative_schedule() {
    let settings = EngineSettings::load(&fixture("engine.toml")).expect("settings should load");

    assert_eq!(settings.new_law_schedule, Some(fixture("flat_new_law.csv")));

    let config = settings.into_engine_config().expect("config should resolve");

    assert_eq!(
        config.personal_relief,
        PersonalReliefFormula::GrossFractionPlusFixed
    );
    assert_eq!(config.rent_relief, RentReliefPolicy::statutory_cap());
    assert_eq!(config.old_law_schedule, BracketSchedule::old_law());
    assert_eq!(config.new_law_schedule.len(), 2);
}

#[test]
fn settings_file_changes_engine_output() {
    let config = EngineSettings::load(&fixture("engine.toml"))
        .and_then(EngineSettings::into_engine_config)
        .unwrap();
    let engine = PayeEngine::new(config);
    let records = PayrollLoader::load_from_file(&fixture("sample_payroll.csv")).unwrap();
    let ada = &records[0];

    let result = engine.recompute(&ada.salary, &ada.deductions);
    let baseline = PayeEngine::new(EngineConfig::default()).recompute(&ada.salary, &ada.deductions);

    // 6268051.2 taxable, first ₦1,000,000 free, 20% above
    assert_eq!(result.new_law.annual_tax, dec!(1053610.24));
    assert_eq!(result.old_law.annual_tax, dec!(930764.288));
    assert!(result.old_law.annual_tax < baseline.old_law.annual_tax);
}

#[test]
fn settings_schedule_without_the_requested_regime_is_rejected() {
    let settings = EngineSettings::load(&fixture("missing_old_law.toml")).unwrap();

    let err = settings.into_engine_config().unwrap_err();

    assert!(matches!(
        err,
        SettingsError::MissingSchedule {
            regime: Regime::OldLaw,
            ..
        }
    ));
}
