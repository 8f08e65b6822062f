use thiserror::Error;

/// Failure modes of a single reputation lookup.
///
/// The `Display` text of a variant becomes the reason shown in the result
/// list, so messages are written for the user, not the debugger.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The provider answered with its own error envelope; `detail` is the
    /// most specific message it supplied.
    #[error("Error: {detail}")]
    Provider { detail: String },

    /// The request never produced a usable response (connection failure,
    /// timeout, protocol error).
    #[error("Error: {0}")]
    Transport(String),

    /// The provider answered 2xx but the payload did not carry a record.
    /// The parse detail is kept for logs, not shown to the user.
    #[error("Error: Invalid response format")]
    Malformed(String),
}
