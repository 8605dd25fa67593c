pub mod app_config;

pub use app_config::{AppConfig, DEFAULT_CONFIG_FILE};

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "dcs-persist")]
#[command(about = "Mission hour persistence and dynamic weather rotation for a DCS World server")]
pub struct CliArgs {
    /// Directory to run from; config, log and weather templates resolve
    /// relative to it.
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Path to the persistence config JSON.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}
