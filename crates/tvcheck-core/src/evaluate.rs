// ── Health evaluation ──
//
// Maps a device's connectivity state onto the plugin severity scale used
// by Nagios-compatible schedulers (Icinga, Naemon, Checkmk, ...).

use serde::{Serialize, Serializer};
use strum::Display;

use crate::model::Device;

/// Plugin result severity. The probe has no warning threshold, so only
/// the three states it can report are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Critical,
    Unknown,
}

impl Status {
    /// Process exit code under the monitoring plugin convention.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of one probe: a severity and the line shown by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub status: Status,
    pub message: String,
}

impl Verdict {
    /// Build a verdict whose message is `"<STATUS> - <detail>"`.
    pub fn new(status: Status, detail: impl std::fmt::Display) -> Self {
        Self {
            status,
            message: format!("{status} - {detail}"),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Classify a device: `OK` iff its state is exactly `"Online"`, otherwise
/// `CRITICAL`. Unrecognized vendor states are not healthy.
pub fn evaluate(device: &Device) -> Verdict {
    let status = if device.is_online() {
        Status::Ok
    } else {
        Status::Critical
    };

    Verdict::new(
        status,
        format_args!("TeamViewer {}: {}", device.online_state, device.alias),
    )
}
