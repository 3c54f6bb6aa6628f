use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::{DurationArg, LogLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "tracegrid")]
#[command(about = "Render LLM run exports as tables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to TRACEGRID_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log verbosity on stderr (overrides TRACEGRID_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print runs as a table
    Table {
        #[command(flatten)]
        table: TableArgs,

        #[arg(long, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },

    /// Browse runs interactively
    Tui {
        #[command(flatten)]
        table: TableArgs,
    },

    /// List column names accepted by --columns
    Columns {
        #[arg(long, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Args)]
pub struct TableArgs {
    /// JSON file with a run array or an API page (`{"data": [...]}`)
    pub runs: PathBuf,

    /// Comma-separated column names (see `tracegrid columns`)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Extra enrichment columns, by kind
    #[arg(long = "enrichment", value_name = "KIND")]
    pub enrichments: Vec<String>,

    /// Aggregate feedback across related runs
    #[arg(long)]
    pub related: bool,

    /// Look related runs up in this file instead of the runs file
    #[arg(long, value_name = "FILE", conflicts_with = "api_url")]
    pub related_file: Option<PathBuf>,

    /// Look related runs up through this API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Sort by column, e.g. `cost` or `duration:desc`
    #[arg(long, value_name = "COLUMN[:asc|desc]")]
    pub sort: Option<String>,

    #[arg(long)]
    pub duration: Option<DurationArg>,

    /// Locale for dates, e.g. `fr_FR`
    #[arg(long)]
    pub locale: Option<String>,

    /// IANA time zone, e.g. `Europe/Paris`
    #[arg(long)]
    pub timezone: Option<String>,

    /// Mask status and cost text
    #[arg(long)]
    pub mask: bool,
}
