//! Command-line arguments.

use crate::components::bracket::StridePolicy;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bktui")]
#[command(version)]
#[command(about = "View tournament brackets from a text file in your terminal", long_about = None)]
pub struct Cli {
    /// Text file holding one or more `[team, team, ...]` brackets
    pub file: Option<PathBuf>,

    /// How to thin out rounds taller than the terminal: auto, off, or every Nth entry
    #[arg(short = 's', long, value_name = "POLICY", default_value = "auto", value_parser = parse_stride)]
    pub stride: StridePolicy,

    /// Go straight to the first bracket
    #[arg(long)]
    pub skip_welcome: bool,

    /// Show a log pane under the bracket
    #[arg(long)]
    pub show_logs: bool,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(short = 'l', long, value_name = "LEVEL", default_value = "warn", value_parser = parse_log_level)]
    pub log_level: LevelFilter,
}

fn parse_stride(value: &str) -> Result<StridePolicy, String> {
    value.parse()
}

fn parse_log_level(value: &str) -> Result<LevelFilter, String> {
    value.parse().map_err(|_| {
        format!("invalid log level '{value}': expected off, error, warn, info, debug or trace")
    })
}
