use std::time::Duration;

/// Runtime configuration for a reputation run.
///
/// Built by the CLI from parsed flags; everything here is a tunable, not a
/// constant. `batch_size` and `batch_delay` are the only knobs the scheduler
/// reads.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of lookups allowed in flight at once. Groups of this size are
    /// processed sequentially.
    pub batch_size: usize,
    /// Pause between consecutive groups. A courtesy throttle against the
    /// provider, skipped entirely when zero.
    pub batch_delay: Duration,
    /// Full URL of the reputation check endpoint.
    pub endpoint: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Output verbosity reduction, 0 = full output.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: 5,
            batch_delay: Duration::from_millis(500),
            endpoint: String::from("http://127.0.0.1:1323/check/endpoint"),
            timeout: Duration::from_secs(30),
            quiet: 0,
        }
    }
}
