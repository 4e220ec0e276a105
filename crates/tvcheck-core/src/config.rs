// ── Invocation context ──
//
// Everything one probe needs, resolved up front by the binary and moved
// into the probe. Core never reads files or the environment.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use tvcheck_api::TlsMode;

use crate::matcher::MatchCriterion;

/// Configuration for a single probe run.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Device list endpoint (e.g. `https://webapi.teamviewer.com/api/v1/devices`).
    pub api_url: Url,
    /// Bearer token for the Web API.
    pub api_key: SecretString,
    /// The device to report on.
    pub criterion: MatchCriterion,
    /// TLS verification strategy.
    pub tls: TlsMode,
    /// Upper bound for the inventory request.
    pub timeout: Duration,
}

impl ProbeConfig {
    /// Config with default transport settings (system roots, 30s timeout).
    pub fn new(api_url: Url, api_key: SecretString, criterion: MatchCriterion) -> Self {
        Self {
            api_url,
            api_key,
            criterion,
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}
