// ── Probe facade ──
//
// One fetch, one decode, one match, one evaluation. No retries and no
// state survives the call.

use tracing::{debug, info};

use tvcheck_api::{InventoryClient, TransportConfig};

use crate::config::ProbeConfig;
use crate::decode::decode;
use crate::error::CoreError;
use crate::evaluate::{Verdict, evaluate};
use crate::matcher::{MatchCriterion, find_device};

/// Run decode → match → evaluate over an already fetched body.
pub fn check_payload(payload: &[u8], criterion: &MatchCriterion) -> Result<Verdict, CoreError> {
    let inventory = decode(payload)?;
    let device = find_device(&inventory.devices, criterion)?;
    Ok(evaluate(device))
}

/// A configured single-shot probe.
pub struct Probe {
    config: ProbeConfig,
}

impl Probe {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Fetch the inventory once and evaluate the configured device.
    pub async fn run(&self) -> Result<Verdict, CoreError> {
        let transport = TransportConfig {
            tls: self.config.tls.clone(),
            timeout: self.config.timeout,
        };
        let client = InventoryClient::from_api_key(
            self.config.api_url.as_str(),
            &self.config.api_key,
            &transport,
        )?;

        debug!(criterion = %self.config.criterion, "fetching device inventory");
        let payload = client
            .fetch_devices()
            .await
            .map_err(|e| self.fetch_error(e))?;

        let verdict = check_payload(&payload, &self.config.criterion)?;
        info!(status = %verdict.status, "{}", verdict.message);
        Ok(verdict)
    }

    fn fetch_error(&self, err: tvcheck_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            },
            other => other,
        }
    }
}
