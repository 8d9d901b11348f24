use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the old-law personal relief is derived from annual gross income.
///
/// Two variants of the calculator disagree on this figure, differing by a
/// fixed ₦200,000. Which one matches the statute is unresolved, so callers
/// choose explicitly and every old-law result records the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonalReliefFormula {
    /// `20% × gross`
    #[default]
    GrossFraction,
    /// `20% × gross + ₦200,000`
    GrossFractionPlusFixed,
}

impl PersonalReliefFormula {
    pub const RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);
    pub const FIXED_AMOUNT: Decimal = Decimal::from_parts(200_000, 0, 0, false, 0);

    pub fn personal_relief(
        &self,
        annual_gross: Decimal,
    ) -> Decimal {
        let fraction = annual_gross * Self::RATE;
        match self {
            Self::GrossFraction => fraction,
            Self::GrossFractionPlusFixed => fraction + Self::FIXED_AMOUNT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GrossFraction => "gross-fraction",
            Self::GrossFractionPlusFixed => "gross-fraction-plus-fixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "gross-fraction" => Some(Self::GrossFraction),
            "gross-fraction-plus-fixed" => Some(Self::GrossFractionPlusFixed),
            _ => None,
        }
    }
}

/// Whether the new-law rent relief is limited to its statutory maximum.
///
/// The calculator advertises a ₦500,000 cap but never applied it. `Advisory`
/// keeps that behaviour; `Capped` clamps the claim before it is subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum RentReliefPolicy {
    #[default]
    Advisory,
    Capped { cap: Decimal },
}

impl RentReliefPolicy {
    pub const STATUTORY_CAP: Decimal = Decimal::from_parts(500_000, 0, 0, false, 0);

    pub fn statutory_cap() -> Self {
        Self::Capped {
            cap: Self::STATUTORY_CAP,
        }
    }

    /// Amount of `claimed` rent relief that is actually deducted.
    pub fn apply(
        &self,
        claimed: Decimal,
    ) -> Decimal {
        match self {
            Self::Advisory => claimed,
            Self::Capped { cap } => claimed.min(*cap),
        }
    }
}
