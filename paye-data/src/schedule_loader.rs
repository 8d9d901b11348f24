//! Bracket schedules from CSV.
//!
//! ## CSV Format
//!
//! | Column       | Type    | Notes |
//! |--------------|---------|-------|
//! | `regime`     | string  | `old` or `new` |
//! | `label`      | string  | Shown in the breakdown, e.g. `First ₦300,000 @ 7%` |
//! | `min_income` | decimal | Cumulative lower bound |
//! | `max_income` | decimal | Cumulative upper bound; empty for the unbounded top bracket |
//! | `rate`       | decimal | Marginal rate as a fraction, e.g. `0.07` |
//!
//! Labels containing commas must be quoted. Rows for a regime must appear in
//! ascending order. A file may define one or both regimes; whatever it leaves
//! out keeps the statutory schedule.
//!
//! ```csv
//! regime,label,min_income,max_income,rate
//! new,"First ₦800,000 @ 0%",0,800000,0
//! new,"Above ₦800,000 @ 20%",800000,,0.20
//! ```

use std::io::Read;
use std::path::Path;

use paye_core::calculations::{BracketSchedule, BracketScheduleError};
use paye_core::{Regime, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("unrecognised regime '{regime}' on row {row}")]
    InvalidRegime { regime: String, row: usize },

    #[error("invalid {regime} schedule: {source}")]
    InvalidSchedule {
        regime: Regime,
        #[source]
        source: BracketScheduleError,
    },

    #[error("cannot read schedule file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A single row of the schedule CSV.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScheduleRecord {
    pub regime: String,
    pub label: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Schedules read from a file. `None` means the file did not mention that
/// regime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSet {
    pub old_law: Option<BracketSchedule>,
    pub new_law: Option<BracketSchedule>,
}

impl ScheduleSet {
    pub fn get(
        &self,
        regime: Regime,
    ) -> Option<&BracketSchedule> {
        match regime {
            Regime::OldLaw => self.old_law.as_ref(),
            Regime::NewLaw => self.new_law.as_ref(),
        }
    }
}

pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parses raw rows without validating them as schedules.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ScheduleRecord>, ScheduleLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: ScheduleRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Groups rows by regime, preserving file order, and validates each group
    /// as a [`BracketSchedule`].
    pub fn build(records: Vec<ScheduleRecord>) -> Result<ScheduleSet, ScheduleLoadError> {
        let mut old_law = Vec::new();
        let mut new_law = Vec::new();

        for (idx, record) in records.into_iter().enumerate() {
            let regime =
                Regime::parse(&record.regime).ok_or_else(|| ScheduleLoadError::InvalidRegime {
                    regime: record.regime.clone(),
                    row: idx + 1,
                })?;
            let bracket = TaxBracket::new(
                record.label,
                record.min_income,
                record.max_income,
                record.rate,
            );
            match regime {
                Regime::OldLaw => old_law.push(bracket),
                Regime::NewLaw => new_law.push(bracket),
            }
        }

        Ok(ScheduleSet {
            old_law: Self::validated(Regime::OldLaw, old_law)?,
            new_law: Self::validated(Regime::NewLaw, new_law)?,
        })
    }

    fn validated(
        regime: Regime,
        brackets: Vec<TaxBracket>,
    ) -> Result<Option<BracketSchedule>, ScheduleLoadError> {
        if brackets.is_empty() {
            return Ok(None);
        }
        BracketSchedule::new(brackets)
            .map(Some)
            .map_err(|source| ScheduleLoadError::InvalidSchedule { regime, source })
    }

    pub fn load_from_str(input: &str) -> Result<ScheduleSet, ScheduleLoadError> {
        Self::build(Self::parse(input.as_bytes())?)
    }

    pub fn load_from_file(path: &Path) -> Result<ScheduleSet, ScheduleLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ScheduleLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&contents)
    }
}
