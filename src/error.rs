//! Error taxonomy for CIS queries.
//!
//! Everything fallible in this crate surfaces as a [`CisError`]; the
//! variants partition into the three categories callers need to tell apart
//! to implement their own retry policy.

/// Errors that can occur while querying the Channel Information System.
///
/// The taxonomy callers care about is three-way:
///
/// - **not found**: an exact-name query matched nothing ([`CisError::NotFound`]);
/// - **validation**: the request was malformed before any network traffic
///   happened ([`CisError::Validation`]);
/// - **service**: the CIS itself misbehaved — transport failure, non-2xx
///   status, or a payload that does not match the documented schema
///   ([`CisError::Transport`], [`CisError::Status`], [`CisError::Json`],
///   [`CisError::Payload`]).
///
/// Use [`CisError::is_service`] to branch on the third category without
/// enumerating its variants.
#[derive(Debug, thiserror::Error)]
pub enum CisError {
    /// An exact-name channel query matched nothing
    #[error("no channel found matching '{0}'")]
    NotFound(String),

    /// The request was rejected before being sent
    #[error("invalid request: {0}")]
    Validation(String),

    /// HTTP transport failure (connect, TLS, timeout)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The CIS answered with a non-success HTTP status
    #[error("CIS returned HTTP {status} for {url}")]
    Status {
        /// The HTTP status code received.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// The response body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response parsed as JSON but did not match the CIS schema
    #[error("unexpected CIS payload: {0}")]
    Payload(String),
}

impl CisError {
    /// `true` for every failure mode attributable to the remote service:
    /// transport errors, non-2xx statuses and malformed payloads.
    pub fn is_service(&self) -> bool {
        matches!(
            self,
            CisError::Transport(_)
                | CisError::Status { .. }
                | CisError::Json(_)
                | CisError::Payload(_)
        )
    }

    /// `true` when an exact query found no matching channel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CisError::NotFound(_))
    }

    /// `true` when the request was rejected without touching the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, CisError::Validation(_))
    }
}
