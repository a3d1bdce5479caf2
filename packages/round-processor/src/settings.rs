use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// Plays a Last-Man-Standing scenario file and prints the final standings.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "round-processor")]
#[command(about = "Play a Last-Man-Standing scenario through the engine", long_about = None)]
pub struct Settings {
    /// JSON scenario to play
    #[arg(env = "LMS_SCENARIO_PATH")]
    pub scenario_path: PathBuf,

    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long, env = "LMS_LOG_LEVEL", default_value = "info")]
    pub log_level: Level,

    /// Manager whose pools and games the scenario runs under
    #[arg(long, env = "LMS_MANAGER_ID", default_value = "local-manager")]
    pub manager_id: String,
}
