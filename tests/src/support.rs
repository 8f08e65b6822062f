use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use ipvet_common::error::LookupError;
use ipvet_common::reputation::LookupRecord;
use ipvet_core::lookup::ReputationProvider;

/// Deterministic provider double with per-IP scripted latency, an optional
/// always-unreachable mode and a call counter.
pub struct ScriptedProvider {
    latencies: HashMap<String, Duration>,
    unreachable: bool,
    pub calls: AtomicUsize,
}

impl ScriptedProvider {
    /// Answers every IP with a fixed benign record.
    pub fn ok() -> Self {
        Self {
            latencies: HashMap::new(),
            unreachable: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every lookup with a transport error.
    pub fn unreachable() -> Self {
        Self {
            latencies: HashMap::new(),
            unreachable: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, ip: &str, millis: u64) -> Self {
        self.latencies
            .insert(ip.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReputationProvider for ScriptedProvider {
    async fn check(&self, ip: &str) -> Result<LookupRecord, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.latencies.get(ip) {
            tokio::time::sleep(*delay).await;
        }

        if self.unreachable {
            return Err(LookupError::Transport(String::from("connection refused")));
        }

        Ok(LookupRecord {
            ip_address: ip.to_string(),
            abuse_confidence_score: Some(7),
            country_name: Some(String::from("Testland")),
            isp: Some(String::from("Test ISP")),
            domain: Some(String::from("example.test")),
        })
    }
}
