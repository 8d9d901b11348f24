//! Plain-text and JSON rendering.
//!
//! Amounts in tables are rounded to whole Naira; JSON keeps full precision.

use anyhow::Result;
use clap::ValueEnum;
use paye_core::calculations::common::round_half_up;
use paye_core::calculations::{
    BracketSchedule, EngineConfig, PayeComparison, RegimeReliefs, RegimeResult,
};
use paye_core::{Regime, RentReliefPolicy};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::app::BatchEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Groups the integer digits of `digits` in threes.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `₦1,234,567`, with a leading minus for negative amounts.
pub fn naira(value: Decimal) -> String {
    let rounded = round_half_up(value, 0);
    let digits = group_thousands(&rounded.abs().trunc().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-₦{digits}")
    } else {
        format!("₦{digits}")
    }
}

pub fn rate(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{}%", round_half_up(v, 2)),
        None => "n/a".to_string(),
    }
}

fn row(
    label: &str,
    old: String,
    new: String,
) -> String {
    format!("{label:<28}{old:>16}{new:>16}")
}

fn relief_lines(result: &RegimeResult) -> Vec<String> {
    match result.reliefs {
        RegimeReliefs::OldLaw {
            personal_relief,
            consolidated_relief_allowance,
            formula,
        } => vec![
            format!(
                "  Personal relief ({}){:>12}",
                formula.as_str(),
                naira(personal_relief)
            ),
            format!(
                "  Consolidated relief allowance{:>12}",
                naira(consolidated_relief_allowance)
            ),
        ],
        RegimeReliefs::NewLaw {
            rent_relief_claimed,
            rent_relief_applied,
        } if rent_relief_claimed != rent_relief_applied => vec![format!(
            "  Rent relief{:>12} (claimed {})",
            naira(rent_relief_applied),
            naira(rent_relief_claimed)
        )],
        RegimeReliefs::NewLaw {
            rent_relief_applied,
            ..
        } => vec![format!("  Rent relief{:>12}", naira(rent_relief_applied))],
    }
}

fn breakdown_lines(result: &RegimeResult) -> Vec<String> {
    let mut lines = vec![format!("{} breakdown", result.regime)];
    lines.extend(result.breakdown.iter().map(|c| {
        format!(
            "  {:<26}{:>16}{:>16}",
            c.label,
            naira(c.taxable_amount),
            naira(c.tax)
        )
    }));
    lines
}

fn summary_line(result: &PayeComparison) -> String {
    let savings = &result.savings;
    let verdict = if savings.annual_tax_delta.is_zero() {
        "Both regimes charge the same tax".to_string()
    } else {
        let verb = if savings.new_law_saves() { "saves" } else { "costs" };
        format!(
            "New Law {verb} {} a year ({} a month)",
            naira(savings.annual_tax_delta.abs()),
            naira(savings.monthly_tax_delta.abs())
        )
    };
    let net = if savings.monthly_net_pay_delta.is_sign_negative() {
        "falls"
    } else {
        "rises"
    };
    format!(
        "{verdict}; monthly net pay {net} by {}.",
        naira(savings.monthly_net_pay_delta.abs())
    )
}

pub fn render_comparison(result: &PayeComparison) -> String {
    let old = &result.old_law;
    let new = &result.new_law;

    let mut lines = vec![
        format!("{:<28}{:>16}", "Monthly gross", naira(result.monthly.gross)),
        format!("{:<28}{:>16}", "Monthly pension (8%)", naira(result.monthly.pension)),
        format!("{:<28}{:>16}", "Annual gross", naira(result.annual.gross)),
        String::new(),
        row("", Regime::OldLaw.to_string(), Regime::NewLaw.to_string()),
        row("Taxable income", naira(old.taxable_income), naira(new.taxable_income)),
        row("Annual tax", naira(old.annual_tax), naira(new.annual_tax)),
        row("Monthly tax", naira(old.monthly_tax), naira(new.monthly_tax)),
        row("Monthly net pay", naira(old.net_pay), naira(new.net_pay)),
        row(
            "Effective rate",
            rate(old.effective_rate_percent),
            rate(new.effective_rate_percent),
        ),
        String::new(),
        "Reliefs".to_string(),
    ];
    lines.extend(relief_lines(old));
    lines.extend(relief_lines(new));
    lines.push(String::new());
    lines.extend(breakdown_lines(old));
    lines.extend(breakdown_lines(new));
    lines.push(String::new());
    lines.push(summary_line(result));

    lines.join("\n")
}

pub fn render_batch(entries: &[BatchEntry]) -> String {
    let mut lines = vec![format!(
        "{:<20}{:>16}{:>16}{:>16}{:>16}",
        "Employee", "Annual gross", "Old Law tax", "New Law tax", "Saving"
    )];
    lines.extend(entries.iter().map(|entry| {
        let r = &entry.result;
        format!(
            "{:<20}{:>16}{:>16}{:>16}{:>16}",
            entry.employee,
            naira(r.annual.gross),
            naira(r.old_law.annual_tax),
            naira(r.new_law.annual_tax),
            naira(r.savings.annual_tax_delta)
        )
    }));
    lines.join("\n")
}

fn schedule_lines(
    regime: Regime,
    schedule: &BracketSchedule,
) -> Vec<String> {
    let mut lines = vec![format!("{regime} schedule")];
    lines.extend(schedule.brackets().iter().map(|b| {
        let upper = b.max_income.map_or_else(|| "and above".to_string(), naira);
        format!(
            "  {:<26}{:>16} to {:<16}{:>7}%",
            b.label,
            naira(b.min_income),
            upper,
            (b.tax_rate * Decimal::ONE_HUNDRED).normalize()
        )
    }));
    lines
}

pub fn render_schedules(config: &EngineConfig) -> String {
    let mut lines = schedule_lines(Regime::OldLaw, &config.old_law_schedule);
    lines.push(format!(
        "  personal relief formula: {}",
        config.personal_relief.as_str()
    ));
    lines.push(String::new());
    lines.extend(schedule_lines(Regime::NewLaw, &config.new_law_schedule));
    lines.push(match config.rent_relief {
        RentReliefPolicy::Advisory => "  rent relief: not capped".to_string(),
        RentReliefPolicy::Capped { cap } => format!("  rent relief: capped at {}", naira(cap)),
    });
    lines.join("\n")
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
