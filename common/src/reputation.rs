//! # Reputation Domain Model
//!
//! Wire shapes of the remote reputation provider and the per-IP outcome
//! type the rest of the system works with.
//!
//! The provider returns a much larger record than we display; serde drops
//! the fields we never render, and everything we do render is optional on
//! the wire, with `-` substituted at display time.

use serde::Deserialize;

/// Placeholder shown for any record field the provider left out.
pub const PLACEHOLDER: &str = "-";

/// The displayed subset of a provider reputation record.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRecord {
    pub ip_address: String,
    #[serde(default)]
    pub abuse_confidence_score: Option<i64>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

/// Success envelope: `{ "data": { ... } }`. Any other shape is a failure.
#[derive(Debug, Deserialize)]
pub struct CheckResponse {
    pub data: LookupRecord,
}

/// Provider error envelope: `{ "errors": [ { "detail": ... } ] }`.
///
/// Parsed leniently; an unrecognized error body simply yields no detail.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorEnvelope {
    /// The most specific message the provider supplied, if any.
    pub fn first_detail(&self) -> Option<&str> {
        self.errors.iter().find_map(|e| e.detail.as_deref())
    }
}

/// Result of processing one candidate token, success or failure, exactly
/// one per extracted token and in the same order.
#[derive(Clone, Debug)]
pub enum Outcome {
    Success(LookupRecord),
    Failure { ip: String, reason: String },
}

impl Outcome {
    pub fn ip(&self) -> &str {
        match self {
            Outcome::Success(record) => &record.ip_address,
            Outcome::Failure { ip, .. } => ip,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure { .. })
    }
}
