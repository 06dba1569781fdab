//! computo CLI — chained custodial-term computation
//!
//! Commands: compute, propose, subtract, completions

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use computo_core::calendar::subtract_duration;
use computo_core::{
    compute_with_overrides, Cause, ChainConfig, ChainMode, DateError, Expedient, InputError,
    Regime, RoundingMode, View,
};
use computo_format::{
    format_computation, format_dmy, format_proposal, load_settings, load_settings_or_default,
    parse_dmy, CaseFile, OutputFormat, SETTINGS_FILE,
};
use computo_solver::{apply_proposal, propose_credits, ApplyMode, CreditRequest, DistributionMode};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "computo")]
#[command(version)]
#[command(about = "Completion date, minimum terms, and credit planning for chained sentences")]
struct Cli {
    /// Settings file with default policy [default: ./computo.toml if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Compute completion date, TM, TMBI and CET
    #[command(alias = "c")]
    Compute {
        #[command(flatten)]
        expedient: ExpedientArgs,

        /// Output format: json, table, markdown, summary
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Propose per-cause credit for a budget or a target completion date
    #[command(alias = "p")]
    Propose {
        #[command(flatten)]
        expedient: ExpedientArgs,

        /// Additional days of credit to distribute
        #[arg(long, conflicts_with = "target", required_unless_present = "target")]
        budget: Option<u32>,

        /// Desired completion date, DD/MM/YYYY
        #[arg(long, value_parser = parse_date)]
        target: Option<NaiveDate>,

        /// Distribution mode
        #[arg(long, value_enum, default_value = "severe")]
        mode: ModeArg,

        /// Also show the computation with the proposal applied
        #[arg(long)]
        apply: bool,

        /// Output format: json, table, markdown, summary
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Subtract years, months and days from a date
    Subtract {
        /// Date, DD/MM/YYYY
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,

        #[arg(long, default_value_t = 0)]
        years: u32,

        #[arg(long, default_value_t = 0)]
        months: u32,

        #[arg(long, default_value_t = 0)]
        days: u32,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where the expedient comes from: a case file, flags, or both.
#[derive(clap::Args)]
struct ExpedientArgs {
    /// Case file (.json, .yaml, .yml, .toml)
    #[arg(long)]
    case: Option<PathBuf>,

    /// Start date, DD/MM/YYYY (overrides the case file)
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    /// Cause as Y,M,D[,CREDIT[,REGIME]], appended after case-file causes (repeatable)
    #[arg(long = "cause", value_parser = parse_cause, allow_hyphen_values = true)]
    causes: Vec<Cause>,

    #[command(flatten)]
    policy: PolicyArgs,

    /// Manually entered TM date, DD/MM/YYYY
    #[arg(long, value_parser = parse_date)]
    tm: Option<NaiveDate>,

    /// Manually entered TMBI date, DD/MM/YYYY
    #[arg(long, value_parser = parse_date)]
    tmbi: Option<NaiveDate>,
}

/// Policy flags. Each one overrides the settings file and the case file.
#[derive(clap::Args)]
struct PolicyArgs {
    #[arg(long, value_enum)]
    chain_mode: Option<ChainModeArg>,

    /// 1/2, 2/3, or auto (suggested from the causes)
    #[arg(long, value_parser = parse_regime)]
    regime: Option<RegimeChoice>,

    #[arg(long, value_enum)]
    view: Option<ViewArg>,

    #[arg(long, value_enum)]
    rounding: Option<RoundingArg>,

    /// Expedient-wide credit in days
    #[arg(long)]
    global_credit: Option<u32>,

    /// Subtract the global credit from the TM/TMBI/CET base too
    #[arg(long)]
    apply_global_to_minimums: bool,

    /// Chain causes longest first instead of in the given order
    #[arg(long)]
    severe_first: bool,

    /// Shift the displayed TM by -1, 0 or +1 days
    #[arg(long, allow_hyphen_values = true)]
    tm_adjust: Option<i8>,

    /// Shift the displayed CET by -1, 0 or +1 days
    #[arg(long, allow_hyphen_values = true)]
    cet_adjust: Option<i8>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ChainModeArg {
    NextDay,
    SameDay,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Official,
    Doctrinal,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoundingArg {
    Ceil,
    Floor,
    Nearest,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Severe,
    Proportional,
}

#[derive(Clone, Copy)]
enum RegimeChoice {
    Fixed(Regime),
    Auto,
}

fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    parse_dmy(s)
}

fn parse_regime(s: &str) -> Result<RegimeChoice, InputError> {
    if s.eq_ignore_ascii_case("auto") {
        Ok(RegimeChoice::Auto)
    } else {
        s.parse().map(RegimeChoice::Fixed)
    }
}

fn parse_cause(s: &str) -> Result<Cause, InputError> {
    let malformed = || InputError::MalformedCause(s.to_string());
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if !(3..=5).contains(&parts.len()) {
        return Err(malformed());
    }
    let number = |i: usize| -> Result<i64, InputError> {
        match parts.get(i) {
            Some(p) if !p.is_empty() => p.parse().map_err(|_| malformed()),
            _ => Ok(0),
        }
    };
    let cause = Cause::from_signed(number(0)?, number(1)?, number(2)?, number(3)?);
    match parts.get(4) {
        Some(regime) if !regime.is_empty() => Ok(cause.with_regime(regime.parse()?)),
        _ => Ok(cause),
    }
}

impl PolicyArgs {
    fn apply_to(&self, config: &mut ChainConfig, causes: &[Cause]) -> Result<()> {
        if let Some(mode) = self.chain_mode {
            config.chain_mode = match mode {
                ChainModeArg::NextDay => ChainMode::NextDay,
                ChainModeArg::SameDay => ChainMode::SameDay,
            };
        }
        if let Some(choice) = self.regime {
            config.regime = match choice {
                RegimeChoice::Fixed(regime) => regime,
                RegimeChoice::Auto => Regime::suggested_for(causes),
            };
        }
        if let Some(view) = self.view {
            config.view = match view {
                ViewArg::Official => View::Official,
                ViewArg::Doctrinal => View::Doctrinal,
            };
        }
        if let Some(rounding) = self.rounding {
            config.rounding = match rounding {
                RoundingArg::Ceil => RoundingMode::Ceil,
                RoundingArg::Floor => RoundingMode::Floor,
                RoundingArg::Nearest => RoundingMode::Nearest,
            };
        }
        if let Some(days) = self.global_credit {
            config.global_credit_days = days;
        }
        if self.apply_global_to_minimums {
            config.apply_global_credit_to_minimums = true;
        }
        if self.severe_first {
            config.order_most_severe_first = true;
        }
        if let Some(shift) = self.tm_adjust {
            config.adjustments.tm_days = shift;
        }
        if let Some(shift) = self.cet_adjust {
            config.adjustments.cet_days = shift;
        }
        config.adjustments.validate()?;
        Ok(())
    }
}

fn load_defaults(path: Option<&Path>) -> Result<ChainConfig> {
    match path {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => load_settings_or_default(Path::new(SETTINGS_FILE))
            .with_context(|| format!("failed to load settings from ./{SETTINGS_FILE}")),
    }
}

fn build_expedient(args: &ExpedientArgs, defaults: ChainConfig) -> Result<Expedient> {
    let mut expedient = match &args.case {
        Some(path) => CaseFile::load(path)
            .with_context(|| format!("failed to load case file {}", path.display()))?
            .into_expedient(defaults)?,
        None => {
            let start = args.start.ok_or(InputError::MissingStart)?;
            Expedient::new(start, Vec::new(), defaults)
        }
    };

    if let Some(start) = args.start {
        expedient.start = start;
    }
    expedient.causes.extend(args.causes.iter().copied());
    args.policy.apply_to(&mut expedient.config, &expedient.causes)?;
    if args.tm.is_some() {
        expedient.overrides.tm = args.tm;
    }
    if args.tmbi.is_some() {
        expedient.overrides.tmbi = args.tmbi;
    }

    debug!(
        start = %format_dmy(expedient.start),
        causes = expedient.causes.len(),
        "expedient ready"
    );
    Ok(expedient)
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Compute { expedient, format } => {
            let defaults = load_defaults(cli.config.as_deref())?;
            let expedient = build_expedient(&expedient, defaults)?;
            let result = expedient.compute();
            println!(
                "{}",
                format_computation(&result, &expedient.config, format).trim_end()
            );
        }
        Commands::Propose {
            expedient,
            budget,
            target,
            mode,
            apply,
            format,
        } => {
            let defaults = load_defaults(cli.config.as_deref())?;
            let expedient = build_expedient(&expedient, defaults)?;
            let request = match (budget, target) {
                (_, Some(date)) => CreditRequest::TargetDate(date),
                (Some(days), None) => CreditRequest::Budget(days),
                (None, None) => anyhow::bail!("either --budget or --target is required"),
            };
            let mode = match mode {
                ModeArg::Severe => DistributionMode::MostSevereFirst,
                ModeArg::Proportional => DistributionMode::Proportional,
            };

            let proposal = propose_credits(
                expedient.start,
                &expedient.causes,
                &expedient.config,
                request,
                mode,
            )
            .context("no credit proposal")?;
            println!("{}", format_proposal(&proposal, format).trim_end());

            if apply {
                let causes = apply_proposal(&expedient.causes, &proposal, ApplyMode::Add);
                let result = compute_with_overrides(
                    expedient.start,
                    &causes,
                    &expedient.config,
                    &expedient.overrides,
                );
                println!();
                println!(
                    "{}",
                    format_computation(&result, &expedient.config, format).trim_end()
                );
            }
        }
        Commands::Subtract {
            date,
            years,
            months,
            days,
        } => {
            println!("{}", format_dmy(subtract_duration(date, years, months, days)));
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "computo", &mut std::io::stdout());
        }
    }

    Ok(())
}
