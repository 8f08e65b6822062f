use std::time::Duration;

use colored::*;

use ipvet_common::config::Config;
use ipvet_common::reputation::{Outcome, PLACEHOLDER};
use ipvet_core::batch::{NO_CANDIDATES_MSG, RunSnapshot};

pub const TOTAL_WIDTH: usize = 96;

const IP_W: usize = 16;
const SCORE_W: usize = 12;
const COUNTRY_W: usize = 22;
const ISP_W: usize = 30;

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    println!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right).bright_black(),
    );
}

/// Renders the final run: result table, error panel, timed summary.
pub fn report(snapshot: &RunSnapshot, total_time: Duration, cfg: &Config) {
    if snapshot.total == 0 {
        header("NO RESULTS", cfg.quiet);
        println!("{}", NO_CANDIDATES_MSG.yellow());
        return;
    }

    header("Reputation Results", cfg.quiet);

    if cfg.quiet < 2 {
        print_table(&snapshot.outcomes);
    }
    print_errors(&snapshot.errors);
    print_summary(snapshot, total_time);
}

fn print_table(outcomes: &[Outcome]) {
    println!(
        "{}{}{}{}{}",
        pad("IP ADDRESS", IP_W).bold(),
        pad("ABUSE SCORE", SCORE_W).bold(),
        pad("COUNTRY", COUNTRY_W).bold(),
        pad("ISP", ISP_W).bold(),
        "DOMAIN".bold(),
    );
    println!("{}", "─".repeat(TOTAL_WIDTH).bright_black());

    for outcome in outcomes {
        match outcome {
            Outcome::Success(record) => {
                println!(
                    "{}{}{}{}{}",
                    pad(&record.ip_address, IP_W),
                    score_cell(record.abuse_confidence_score),
                    pad(record.country_name.as_deref().unwrap_or(PLACEHOLDER), COUNTRY_W),
                    pad(record.isp.as_deref().unwrap_or(PLACEHOLDER), ISP_W),
                    record.domain.as_deref().unwrap_or(PLACEHOLDER),
                );
            }
            Outcome::Failure { ip, reason } => {
                println!(
                    "{}{}{}{}{}",
                    pad(ip, IP_W).red(),
                    pad(PLACEHOLDER, SCORE_W).red(),
                    pad(PLACEHOLDER, COUNTRY_W).red(),
                    pad(reason, ISP_W).red(),
                    PLACEHOLDER.red(),
                );
            }
        }
    }
}

/// Pads before coloring, so ANSI escapes never skew column widths.
/// Values wider than their column are truncated with an ellipsis.
fn pad(value: &str, width: usize) -> String {
    let max = width.saturating_sub(2);
    if value.chars().count() > max {
        let mut cell: String = value.chars().take(max.saturating_sub(1)).collect();
        cell.push('…');
        format!("{cell:<width$}")
    } else {
        format!("{value:<width$}")
    }
}

/// Same thresholds the reputation service uses for its own UI: 80+ is
/// malicious, 50+ suspicious.
fn score_cell(score: Option<i64>) -> ColoredString {
    let Some(score) = score else {
        return pad(PLACEHOLDER, SCORE_W).normal();
    };

    let cell = pad(&score.to_string(), SCORE_W);
    match score {
        s if s >= 80 => cell.red().bold(),
        s if s >= 50 => cell.yellow(),
        _ => cell.green(),
    }
}

fn print_errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    println!();
    for error in errors {
        println!("{} {}", "[-]".red().bold(), error.red());
    }
}

fn print_summary(snapshot: &RunSnapshot, total_time: Duration) {
    let failed = snapshot.outcomes.iter().filter(|o| o.is_failure()).count();

    let checked: ColoredString = format!("{} addresses", snapshot.total).bold().green();
    let failures: ColoredString = match failed {
        0 => "no failures".normal(),
        n => format!("{n} failed").bold().red(),
    };
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    println!();
    println!("Check complete: {checked} processed, {failures}, in {elapsed}");
}
