//! # Remote Reputation Lookup
//!
//! The provider boundary: one request, one response, one attempt.
//!
//! High-level modules depend on the [`ReputationProvider`] trait rather than
//! the HTTP implementation, so the scheduler can be driven by a deterministic
//! in-process double in tests. Provider-specific response details (the error
//! envelope, extra record fields) stay behind this boundary.

use async_trait::async_trait;
use tracing::debug;

use ipvet_common::config::Config;
use ipvet_common::error::LookupError;
use ipvet_common::reputation::{CheckResponse, ErrorEnvelope, LookupRecord};

/// A source of reputation records, one IP per call.
///
/// Implementations must not retry internally; the caller decides what a
/// failure means.
#[async_trait]
pub trait ReputationProvider: Send + Sync {
    async fn check(&self, ip: &str) -> Result<LookupRecord, LookupError>;
}

/// The real provider: a JSON POST per IP against the configured endpoint.
pub struct HttpProvider {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ReputationProvider for HttpProvider {
    async fn check(&self, ip: &str) -> Result<LookupRecord, LookupError> {
        debug!("checking {ip} against {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "ip": ip }))
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        if !status.is_success() {
            // Prefer the provider's own detail message over the bare status.
            let envelope: ErrorEnvelope = serde_json::from_slice(&body).unwrap_or_default();
            let detail = envelope
                .first_detail()
                .map(str::to_string)
                .unwrap_or_else(|| format!("provider returned HTTP {status}"));
            return Err(LookupError::Provider { detail });
        }

        match serde_json::from_slice::<CheckResponse>(&body) {
            Ok(parsed) => Ok(parsed.data),
            Err(e) => Err(LookupError::Malformed(e.to_string())),
        }
    }
}
