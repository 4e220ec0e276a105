// ── Core error types ──
//
// Outcomes that stop a probe before a verdict exists. Fetch failures are
// translated from `tvcheck_api::Error` so the binary never matches on
// transport details directly.

use thiserror::Error;

use crate::matcher::MatchCriterion;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Pipeline errors ──────────────────────────────────────────────
    /// The body is not a JSON object of the expected shape.
    #[error("Failed to parse TeamViewer API response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// No device in the inventory satisfies the criterion.
    #[error("Device not found: {}", criterion.value())]
    DeviceNotFound { criterion: MatchCriterion },

    #[error("Invalid {criterion}: {reason}")]
    InvalidCriterion {
        criterion: MatchCriterion,
        reason: String,
    },

    // ── Fetch errors ─────────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` if the inventory could not be retrieved at all.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::AuthenticationFailed { .. }
                | Self::Timeout { .. }
                | Self::Api { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tvcheck_api::Error> for CoreError {
    fn from(err: tvcheck_api::Error) -> Self {
        match err {
            tvcheck_api::Error::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "TeamViewer API rejected the API key".into(),
            },
            tvcheck_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            tvcheck_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() || e.is_request() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: err.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            tvcheck_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            tvcheck_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            tvcheck_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Api {
                message: format!("HTTP {status}: {message}"),
                code,
                status: Some(status),
            },
        }
    }
}
