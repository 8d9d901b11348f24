//! Payroll batches from CSV.
//!
//! ## CSV Format
//!
//! Headers are matched by name; column order does not matter.
//!
//! | Column                  | Required | Notes |
//! |-------------------------|----------|-------|
//! | `employee`              | yes      | Free-form identifier |
//! | `basic`                 | yes      | Monthly |
//! | `housing`               | yes      | Monthly |
//! | `transport`             | yes      | Monthly |
//! | `other`                 | yes      | Monthly, not pensionable |
//! | `rent_relief`           | no       | Annual |
//! | `nhf`                   | no       | Annual |
//! | `nhis`                  | no       | Annual |
//! | `life_insurance`        | no       | Annual |
//! | `housing_loan_interest` | no       | Annual |
//!
//! Amount cells go through [`coerce_amount`], so `"₦253,680"` is accepted and
//! a blank or unreadable cell counts as zero. Missing optional columns are
//! zero as well.
//!
//! ```csv
//! employee,basic,housing,transport,other,rent_relief
//! ada,"253,680","190,260","126,840","22,220",300000
//! ```

use std::path::Path;

use paye_core::{DeductionInput, SalaryInput};
use serde::Deserialize;
use thiserror::Error;

use crate::amount::coerce_amount;

#[derive(Debug, Error)]
pub enum PayrollLoadError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("row {row} has no employee identifier")]
    MissingEmployee { row: usize },

    #[error("cannot read payroll file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    employee: String,
    basic: String,
    housing: String,
    transport: String,
    other: String,
    #[serde(default)]
    rent_relief: String,
    #[serde(default)]
    nhf: String,
    #[serde(default)]
    nhis: String,
    #[serde(default)]
    life_insurance: String,
    #[serde(default)]
    housing_loan_interest: String,
}

/// One employee's inputs, ready for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollRecord {
    pub employee: String,
    pub salary: SalaryInput,
    pub deductions: DeductionInput,
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<PayrollRecord, PayrollLoadError> {
    if row.employee.is_empty() {
        return Err(PayrollLoadError::MissingEmployee { row: row_number });
    }

    Ok(PayrollRecord {
        employee: row.employee,
        salary: SalaryInput {
            basic: coerce_amount(&row.basic),
            housing: coerce_amount(&row.housing),
            transport: coerce_amount(&row.transport),
            other: coerce_amount(&row.other),
        },
        deductions: DeductionInput {
            rent_relief: coerce_amount(&row.rent_relief),
            nhf: coerce_amount(&row.nhf),
            nhis: coerce_amount(&row.nhis),
            life_insurance: coerce_amount(&row.life_insurance),
            housing_loan_interest: coerce_amount(&row.housing_loan_interest),
        },
    })
}

pub struct PayrollLoader;

impl PayrollLoader {
    /// Parses CSV text into records, in file order.
    pub fn load_from_str(input: &str) -> Result<Vec<PayrollRecord>, PayrollLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(input.as_bytes());

        reader
            .deserialize::<CsvRow>()
            .enumerate()
            .map(|(idx, result)| convert_row(result?, idx + 1))
            .collect()
    }

    pub fn load_from_file(path: &Path) -> Result<Vec<PayrollRecord>, PayrollLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PayrollLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&contents)
    }
}
