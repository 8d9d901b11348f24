use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    OldLaw,
    NewLaw,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OldLaw => "old",
            Self::NewLaw => "new",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" | "old_law" | "old-law" => Some(Self::OldLaw),
            "new" | "new_law" | "new-law" => Some(Self::NewLaw),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OldLaw => "Old Law",
            Self::NewLaw => "New Law",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
