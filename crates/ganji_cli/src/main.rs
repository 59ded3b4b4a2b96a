//! `ganji`: four-pillar charts from the command line.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ganji_base::{HourConvention, RatSplit};
use ganji_config::{DEFAULT_LOG_FILTER, GanjiConfig, LoggingConfig};
use ganji_time::{CivilDate, ClockTime};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ganji", about = "Four-pillar (saju) chart calculator")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Full four-pillar chart
    Chart {
        /// Birth date (YYYY-MM-DD); lunar with --lunar
        #[arg(long)]
        date: String,
        /// Wall-clock time in Korean standard time (HH:MM)
        #[arg(long, conflicts_with = "slot", required_unless_present = "slot")]
        time: Option<ClockTime>,
        /// Named time slot, e.g. "21:30–23:30" (see `ganji slots`)
        #[arg(long)]
        slot: Option<String>,
        /// Interpret --date as a lunar date (needs a reference table)
        #[arg(long)]
        lunar: bool,
        /// Lunar date is in a leap month
        #[arg(long, requires = "lunar")]
        leap: bool,
        /// Reference table file (.csv/.txt or .json)
        #[arg(long)]
        table: Option<PathBuf>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        convention: ConventionArgs,
    },
    /// Year pillar of a date
    Year {
        #[arg(long)]
        date: CivilDate,
    },
    /// Month pillar of a date
    Month {
        #[arg(long)]
        date: CivilDate,
    },
    /// Day pillar of a date
    Day {
        #[arg(long)]
        date: CivilDate,
    },
    /// Hour pillar of a date and time
    Hour {
        #[arg(long)]
        date: CivilDate,
        #[arg(long)]
        time: ClockTime,
        #[command(flatten)]
        convention: ConventionArgs,
    },
    /// Five-element tally of four pillars
    Elements {
        /// Comma-separated pillars, e.g. 辛亥,乙未,辛卯,己亥
        #[arg(long, value_delimiter = ',')]
        pillars: Vec<String>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the named time slots
    Slots,
}

/// Overrides for the configured hour convention.
#[derive(Args, Clone, Copy, Default)]
pub(crate) struct ConventionArgs {
    /// Minutes subtracted from the wall clock before bucketing
    #[arg(long)]
    correction: Option<u16>,
    /// Where the 子 hour is split
    #[arg(long, value_enum)]
    rat_split: Option<RatSplitArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum RatSplitArg {
    AdjustedMidnight,
    RawMidnight,
}

impl ConventionArgs {
    pub(crate) fn apply(self, base: HourConvention) -> HourConvention {
        HourConvention {
            correction_minutes: self.correction.unwrap_or(base.correction_minutes),
            rat_split: match self.rat_split {
                Some(RatSplitArg::AdjustedMidnight) => RatSplit::AdjustedMidnight,
                Some(RatSplitArg::RawMidnight) => RatSplit::RawMidnight,
                None => base.rat_split,
            },
        }
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(logging.filter_or_default()))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GanjiConfig::from_file(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => GanjiConfig::default(),
    };
    init_logging(&config.logging);

    match commands::run(cli.command, &config) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
