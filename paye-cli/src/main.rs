use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use paye_cli::app::{self, Baseline, EngineOverrides};
use paye_cli::logging;
use paye_cli::report::{self, OutputFormat};
use paye_cli::state::InputField;
use paye_core::PersonalReliefFormula;
use rust_decimal::Decimal;
use tracing::debug;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Nigerian PAYE calculator: compares income tax under the old (PITA) and
/// new regimes for a monthly salary.
#[derive(Debug, Parser)]
#[command(name = "paye", version, about)]
struct Cli {
    /// TOML settings file (personal relief formula, rent relief cap,
    /// custom schedules).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    /// Old-law personal relief formula; overrides the settings file.
    #[arg(long, global = true, value_parser = parse_formula)]
    personal_relief: Option<PersonalReliefFormula>,

    /// Clamp rent relief to a cap (₦500,000 when no value is given);
    /// overrides the settings file.
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        default_missing_value = "500000",
        value_parser = app::parse_rent_relief_cap
    )]
    cap_rent_relief: Option<Decimal>,

    /// Log filter, e.g. `debug` or `warn,paye_core=trace`. Defaults to
    /// `RUST_LOG`, then `warn`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare both regimes for one salary. Omitted amounts keep the
    /// calculator's defaults, or zero with `--from-zero`.
    Compare(CompareArgs),

    /// Compare both regimes for every employee in a payroll CSV.
    Batch {
        /// Payroll CSV (employee,basic,housing,transport,other,...)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the bracket schedules and relief settings in use.
    Schedules,
}

/// Amounts are taken as text and coerced the same way form input is:
/// thousands separators and a ₦ prefix are allowed, anything unreadable
/// counts as zero.
#[derive(Debug, Args)]
struct CompareArgs {
    /// Start from all-zero inputs instead of the sample salary and default
    /// rent-relief claim.
    #[arg(long)]
    from_zero: bool,
    /// Monthly basic salary.
    #[arg(long, allow_hyphen_values = true)]
    basic: Option<String>,
    /// Monthly housing allowance.
    #[arg(long, allow_hyphen_values = true)]
    housing: Option<String>,
    /// Monthly transport allowance.
    #[arg(long, allow_hyphen_values = true)]
    transport: Option<String>,
    /// Other monthly allowances (not pensionable).
    #[arg(long, allow_hyphen_values = true)]
    other: Option<String>,
    /// Annual rent relief claimed (new law only).
    #[arg(long, allow_hyphen_values = true)]
    rent_relief: Option<String>,
    /// Annual National Housing Fund contribution.
    #[arg(long, allow_hyphen_values = true)]
    nhf: Option<String>,
    /// Annual NHIS contribution.
    #[arg(long, allow_hyphen_values = true)]
    nhis: Option<String>,
    /// Annual life insurance premium.
    #[arg(long, allow_hyphen_values = true)]
    life_insurance: Option<String>,
    /// Annual interest on a housing loan.
    #[arg(long, allow_hyphen_values = true)]
    housing_loan_interest: Option<String>,
}

impl CompareArgs {
    fn baseline(&self) -> Baseline {
        if self.from_zero {
            Baseline::Zero
        } else {
            Baseline::Sample
        }
    }

    fn edits(&self) -> Vec<(InputField, &str)> {
        [
            (InputField::Basic, &self.basic),
            (InputField::Housing, &self.housing),
            (InputField::Transport, &self.transport),
            (InputField::Other, &self.other),
            (InputField::RentRelief, &self.rent_relief),
            (InputField::Nhf, &self.nhf),
            (InputField::Nhis, &self.nhis),
            (InputField::LifeInsurance, &self.life_insurance),
            (InputField::HousingLoanInterest, &self.housing_loan_interest),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

fn parse_formula(s: &str) -> Result<PersonalReliefFormula, String> {
    PersonalReliefFormula::parse(s).ok_or_else(|| {
        format!("expected 'gross-fraction' or 'gross-fraction-plus-fixed', got '{s}'")
    })
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let overrides = EngineOverrides {
        personal_relief: cli.personal_relief,
        rent_relief_cap: cli.cap_rent_relief,
    };
    let engine = app::build_engine(cli.config.as_deref(), &overrides)?;
    debug!(command = ?cli.command, "running command");

    let output = match &cli.command {
        Command::Compare(args) => {
            let result = app::compare(engine, args.baseline(), &args.edits());
            match cli.format {
                OutputFormat::Table => report::render_comparison(&result),
                OutputFormat::Json => report::to_json(&result)?,
            }
        }
        Command::Batch { file } => {
            let entries = app::batch(&engine, file)?;
            match cli.format {
                OutputFormat::Table => report::render_batch(&entries),
                OutputFormat::Json => report::to_json(&entries)?,
            }
        }
        Command::Schedules => match cli.format {
            OutputFormat::Table => report::render_schedules(engine.config()),
            OutputFormat::Json => report::to_json(engine.config())?,
        },
    };

    println!("{output}");
    Ok(())
}
