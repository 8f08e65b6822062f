use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Compact event format: a colored level marker followed by the message,
/// written to stderr so it never interleaves with the result table.
pub struct IpvetFormatter;

fn level_marker(level: Level) -> ColoredString {
    match level {
        Level::TRACE => "[ ]".dimmed(),
        Level::DEBUG => "[?]".blue(),
        Level::INFO => "[+]".green().bold(),
        Level::WARN => "[*]".yellow().bold(),
        Level::ERROR => "[-]".red().bold(),
    }
}

impl<S, N> FormatEvent<S, N> for IpvetFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(writer, "{} ", level_marker(*event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the global subscriber. `RUST_LOG` wins when set; otherwise the
/// quiet level picks the default verbosity.
pub fn init(quiet: u8) {
    let default = if quiet > 0 { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(IpvetFormatter)
        .with_writer(std::io::stderr)
        .init();
}
