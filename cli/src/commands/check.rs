use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::sync::mpsc;

use crate::commands::CommandLine;
use crate::terminal::{print, progress};
use ipvet_common::config::Config;
use ipvet_core::batch::BatchScheduler;
use ipvet_core::lookup::HttpProvider;

/// Runs one end-to-end reputation check over the given input text.
pub async fn check(args: &CommandLine, cfg: &Config) -> anyhow::Result<()> {
    let text = read_input(args.input.as_deref())?;

    let provider = Arc::new(HttpProvider::new(cfg)?);
    let scheduler = BatchScheduler::new(provider, cfg);

    let (tx, rx) = mpsc::unbounded_channel();
    let bar_handle = progress::drive(rx, cfg.quiet);

    let start_time: Instant = Instant::now();
    let finished = scheduler.run(&text, &tx).await;

    drop(tx);
    let _ = bar_handle.await;

    print::report(&finished, start_time.elapsed(), cfg);
    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("reading input file {}", p.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading input from stdin")?;
            Ok(text)
        }
    }
}
