mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, check};
use ipvet_common::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse_args();

    terminal::logging::init(args.quiet);

    let cfg = Config {
        batch_size: args.batch_size,
        batch_delay: Duration::from_millis(args.delay_ms),
        endpoint: args.endpoint.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
        quiet: args.quiet,
    };

    check::check(&args, &cfg).await
}
