// ── Device selection ──
//
// Picks the single device a probe reports on. The two lookup modes are a
// closed enum; the first matching device in inventory order wins.

use std::fmt;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::CoreError;
use crate::model::Device;

/// Prefix the inventory puts in front of a bare TeamViewer ID.
const REMOTE_CONTROL_PREFIX: &str = "r";

/// How the target device is identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MatchCriterion {
    /// Hostname part of an alias of the form `<digits>_<hostname>`.
    ///
    /// Matched as a substring: `myhost` also selects `12345_myhost2`.
    Hostname(String),
    /// Bare numeric TeamViewer ID, compared against `remotecontrol_id`
    /// after prefixing it with `r`.
    RemoteControlId(String),
}

impl MatchCriterion {
    /// The operator-supplied value.
    pub fn value(&self) -> &str {
        match self {
            Self::Hostname(v) | Self::RemoteControlId(v) => v,
        }
    }
}

impl fmt::Display for MatchCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hostname(v) => write!(f, "hostname '{v}'"),
            Self::RemoteControlId(v) => write!(f, "TeamViewer ID '{v}'"),
        }
    }
}

/// Compiled form of a criterion, built once per lookup.
enum Predicate {
    Alias(Regex),
    RemoteControlId(String),
}

impl Predicate {
    fn compile(criterion: &MatchCriterion) -> Result<Self, CoreError> {
        match criterion {
            MatchCriterion::Hostname(hostname) => {
                let pattern = format!("[0-9]+_{}", regex::escape(hostname));
                Regex::new(&pattern)
                    .map(Self::Alias)
                    .map_err(|e| CoreError::InvalidCriterion {
                        criterion: criterion.clone(),
                        reason: e.to_string(),
                    })
            }
            MatchCriterion::RemoteControlId(id) => Ok(Self::RemoteControlId(format!(
                "{REMOTE_CONTROL_PREFIX}{id}"
            ))),
        }
    }

    fn matches(&self, device: &Device) -> bool {
        match self {
            Self::Alias(re) => re.is_match(&device.alias),
            Self::RemoteControlId(expected) => device.remote_control_id == *expected,
        }
    }
}

/// Return the first device in `devices` satisfying `criterion`.
///
/// An empty slice or no match is [`CoreError::DeviceNotFound`].
pub fn find_device<'a>(
    devices: &'a [Device],
    criterion: &MatchCriterion,
) -> Result<&'a Device, CoreError> {
    let predicate = Predicate::compile(criterion)?;

    let found = devices.iter().find(|device| predicate.matches(device));

    match found {
        Some(device) => {
            debug!(
                alias = %device.alias,
                hostname = ?device.hostname(),
                remote_control_id = %device.remote_control_id,
                "matched {criterion}"
            );
            Ok(device)
        }
        None => {
            debug!(searched = devices.len(), "no device matched {criterion}");
            Err(CoreError::DeviceNotFound {
                criterion: criterion.clone(),
            })
        }
    }
}
