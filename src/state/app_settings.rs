use crate::cli::Cli;
use crate::components::bracket::StridePolicy;
use log::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub stride: StridePolicy,
    pub show_welcome: bool,
    pub show_logs: bool,
    pub log_level: LevelFilter,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            stride: StridePolicy::Auto,
            show_welcome: true,
            show_logs: false,
            log_level: LevelFilter::Warn,
        }
    }
}

impl AppSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            stride: cli.stride,
            show_welcome: !cli.skip_welcome,
            show_logs: cli.show_logs,
            log_level: cli.log_level,
        }
    }
}
