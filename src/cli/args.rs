//! Command line argument parsing for the bidwatch CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::notice::Grade;
use crate::query::criteria::{IncludeMode, SearchCriteria, StatusFilter, TitleMatchMode};

/// bidwatch - search public-procurement notices
#[derive(Parser, Debug, Clone)]
#[command(name = "bidwatch")]
#[command(about = "Multi-criteria search over public-procurement notices")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BidwatchArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Config file (JSON)
    #[arg(short, long, env = "BIDWATCH_CONFIG", value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BidwatchArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search notices
    Search(SearchArgs),

    /// Reset the criteria to the configured defaults and list matching notices
    Clear(ClearArgs),

    /// Show the option lists of the search form
    Catalog,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Notice file (JSON array or JSONL); defaults to the built-in samples
    #[arg(short, long, value_name = "NOTICE_FILE")]
    pub notices: Option<PathBuf>,

    /// Region (prefecture); nationwide notices always match
    #[arg(long, default_value = "")]
    pub region: String,

    /// Part of the agency name
    #[arg(long, default_value = "")]
    pub agency: String,

    /// Notice title
    #[arg(long, default_value = "")]
    pub title: String,

    /// Require the title to match exactly instead of partially
    #[arg(long)]
    pub exact_title: bool,

    /// Space-separated keywords to include
    #[arg(short, long, default_value = "")]
    pub include: String,

    /// How include keywords combine
    #[arg(long, default_value = "all")]
    pub include_mode: IncludeModeArg,

    /// Space-separated keywords to exclude
    #[arg(short = 'x', long, default_value = "")]
    pub exclude: String,

    /// Classification (工事, 物品, 役務, 委託, その他)
    #[arg(long, default_value = "")]
    pub classification: String,

    /// Accepted grades (comma-separated); all grades when omitted
    #[arg(short, long, value_delimiter = ',')]
    pub grades: Vec<Grade>,

    /// Publication year (YYYY)
    #[arg(short, long, default_value = "")]
    pub year: String,

    /// First publication month (01-12)
    #[arg(long, default_value = "")]
    pub month_from: String,

    /// Last publication month (01-12)
    #[arg(long, default_value = "")]
    pub month_to: String,

    /// Bid status
    #[arg(short, long, default_value = "all")]
    pub status: StatusArg,

    /// Filter on the rayon thread pool
    #[arg(long)]
    pub parallel: bool,
}

impl SearchArgs {
    /// Build search criteria from the parsed flags.
    ///
    /// Text fields are taken verbatim; only year and months are trimmed.
    pub fn to_criteria(&self) -> SearchCriteria {
        let title_mode = if self.exact_title {
            TitleMatchMode::Exact
        } else {
            TitleMatchMode::Partial
        };
        let mut criteria = SearchCriteria::new()
            .with_region(self.region.clone())
            .with_agency(self.agency.clone())
            .with_title(self.title.clone(), title_mode)
            .with_include_keywords(self.include.clone(), self.include_mode.into())
            .with_exclude_keywords(self.exclude.clone())
            .with_classification(self.classification.clone())
            .with_year(self.year.trim())
            .with_months(self.month_from.trim(), self.month_to.trim())
            .with_status(self.status.into());
        if !self.grades.is_empty() {
            criteria = criteria.with_grades(self.grades.iter().copied());
        }
        criteria
    }
}

/// Arguments for clearing the search
#[derive(Parser, Debug, Clone)]
pub struct ClearArgs {
    /// Notice file (JSON array or JSONL); defaults to the built-in samples
    #[arg(short, long, value_name = "NOTICE_FILE")]
    pub notices: Option<PathBuf>,
}

/// Include keyword modes available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncludeModeArg {
    /// Every keyword must appear
    All,
    /// At least one keyword must appear
    Any,
    /// Ignore include keywords
    ExcludeOnly,
}

impl From<IncludeModeArg> for IncludeMode {
    fn from(mode: IncludeModeArg) -> Self {
        match mode {
            IncludeModeArg::All => IncludeMode::All,
            IncludeModeArg::Any => IncludeMode::Any,
            IncludeModeArg::ExcludeOnly => IncludeMode::ExcludeOnly,
        }
    }
}

/// Bid status filters available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusArg {
    /// Any status
    All,
    /// Accepting bids
    Open,
    /// Bidding ended
    Closed,
}

impl From<StatusArg> for StatusFilter {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::All => StatusFilter::All,
            StatusArg::Open => StatusFilter::Open,
            StatusArg::Closed => StatusFilter::Closed,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
