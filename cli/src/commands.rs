pub mod check;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "ipvet")]
#[command(about = "Batch IP reputation checker.")]
pub struct CommandLine {
    /// File containing the text to scan for IPv4 addresses; stdin when
    /// omitted or "-"
    pub input: Option<PathBuf>,

    /// Number of lookups allowed in flight at once
    #[arg(long, default_value_t = 5)]
    pub batch_size: usize,

    /// Pause between lookup groups, in milliseconds
    #[arg(long = "delay-ms", default_value_t = 500)]
    pub delay_ms: u64,

    /// URL of the reputation check endpoint
    #[arg(long, default_value = "http://127.0.0.1:1323/check/endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long = "timeout-secs", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Reduce output; repeat to suppress the result table as well
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
