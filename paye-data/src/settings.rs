//! Engine settings from TOML.
//!
//! ```toml
//! personal_relief = "gross-fraction-plus-fixed"
//! old_law_schedule = "schedules/old.csv"   # relative to this file
//!
//! [rent_relief]
//! policy = "capped"
//! cap = 500000
//! ```
//!
//! Every key is optional. Omitted keys fall back to
//! [`EngineConfig::default`].

use std::path::{Path, PathBuf};

use paye_core::calculations::{BracketSchedule, EngineConfig};
use paye_core::{PersonalReliefFormula, Regime, RentReliefPolicy};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::schedule_loader::{ScheduleLoadError, ScheduleLoader};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("rent relief cap must be non-negative, got {0}")]
    NegativeRentCap(Decimal),

    #[error(transparent)]
    Schedule(#[from] ScheduleLoadError),

    #[error("schedule file '{path}' defines no {regime} brackets")]
    MissingSchedule { path: String, regime: Regime },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RentReliefPolicyKind {
    #[default]
    Advisory,
    Capped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RentReliefSettings {
    #[serde(default)]
    pub policy: RentReliefPolicyKind,
    /// Only read when `policy = "capped"`; defaults to ₦500,000.
    pub cap: Option<Decimal>,
}

impl RentReliefSettings {
    fn to_policy(&self) -> Result<RentReliefPolicy, SettingsError> {
        match self.policy {
            RentReliefPolicyKind::Advisory => Ok(RentReliefPolicy::Advisory),
            RentReliefPolicyKind::Capped => {
                let cap = self.cap.unwrap_or(RentReliefPolicy::STATUTORY_CAP);
                if cap < Decimal::ZERO {
                    return Err(SettingsError::NegativeRentCap(cap));
                }
                Ok(RentReliefPolicy::Capped { cap })
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSettings {
    #[serde(default)]
    pub personal_relief: PersonalReliefFormula,
    #[serde(default)]
    pub rent_relief: RentReliefSettings,
    pub old_law_schedule: Option<PathBuf>,
    pub new_law_schedule: Option<PathBuf>,
}

impl EngineSettings {
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(input)?)
    }

    /// Reads settings from `path`. Relative schedule paths are resolved
    /// against the directory holding the settings file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut settings = Self::from_toml_str(&contents)?;

        if let Some(base) = path.parent() {
            for schedule in [&mut settings.old_law_schedule, &mut settings.new_law_schedule] {
                if let Some(p) = schedule.as_mut().filter(|p| p.is_relative()) {
                    *p = base.join(&*p);
                }
            }
        }

        debug!(path = %path.display(), "loaded engine settings");
        Ok(settings)
    }

    /// Resolves the settings into an engine configuration, loading any
    /// referenced schedule files.
    pub fn into_engine_config(self) -> Result<EngineConfig, SettingsError> {
        let defaults = EngineConfig::default();

        let old_law_schedule = match &self.old_law_schedule {
            Some(path) => load_schedule(path, Regime::OldLaw)?,
            None => defaults.old_law_schedule,
        };
        let new_law_schedule = match &self.new_law_schedule {
            Some(path) => load_schedule(path, Regime::NewLaw)?,
            None => defaults.new_law_schedule,
        };

        Ok(EngineConfig {
            personal_relief: self.personal_relief,
            rent_relief: self.rent_relief.to_policy()?,
            old_law_schedule,
            new_law_schedule,
        })
    }
}

fn load_schedule(
    path: &Path,
    regime: Regime,
) -> Result<BracketSchedule, SettingsError> {
    let set = ScheduleLoader::load_from_file(path)?;
    set.get(regime).cloned().ok_or_else(|| SettingsError::MissingSchedule {
        path: path.display().to_string(),
        regime,
    })
}
