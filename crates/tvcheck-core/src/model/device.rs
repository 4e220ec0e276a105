// ── Device domain types ──

use serde::{Deserialize, Serialize};

/// The `online_state` value reported for a reachable device.
pub const ONLINE: &str = "Online";

/// One managed endpoint as listed by `GET /api/v1/devices`.
///
/// Every field falls back to its zero value when missing, `null`, or of the
/// wrong type, so one odd attribute never costs the rest of the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Remote-control identifier, the TeamViewer ID prefixed with `r`.
    #[serde(
        default,
        rename = "remotecontrol_id",
        deserialize_with = "crate::decode::lenient"
    )]
    pub remote_control_id: String,

    #[serde(default, deserialize_with = "crate::decode::lenient")]
    pub device_id: String,

    /// Display name, by convention `<digits>_<hostname>`.
    #[serde(default, deserialize_with = "crate::decode::lenient")]
    pub alias: String,

    #[serde(
        default,
        rename = "groupid",
        deserialize_with = "crate::decode::lenient"
    )]
    pub group_id: String,

    /// Vendor connectivity state. Open set; only [`ONLINE`] is healthy.
    #[serde(default, deserialize_with = "crate::decode::lenient")]
    pub online_state: String,

    #[serde(default, deserialize_with = "crate::decode::lenient")]
    pub assigned_to: bool,

    #[serde(default, deserialize_with = "crate::decode::lenient")]
    pub teamviewer_id: i64,
}

impl Device {
    pub fn is_online(&self) -> bool {
        self.online_state == ONLINE
    }

    /// The hostname part of the alias: everything after a leading
    /// `<digits>_` prefix, or `None` if the alias does not follow it.
    pub fn hostname(&self) -> Option<&str> {
        let (prefix, rest) = self.alias.split_once('_')?;
        (!prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit())).then_some(rest)
    }
}

/// A decoded device list, in the order the API returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryResponse {
    pub devices: Vec<Device>,
}

impl InventoryResponse {
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_alias(alias: &str) -> Device {
        Device {
            alias: alias.into(),
            ..Device::default()
        }
    }

    #[test]
    fn only_exact_online_is_online() {
        let mut device = Device::default();
        assert!(!device.is_online());

        device.online_state = "Online".into();
        assert!(device.is_online());

        device.online_state = "online".into();
        assert!(!device.is_online());
    }

    #[test]
    fn hostname_strips_numeric_prefix() {
        assert_eq!(with_alias("12345_myhost").hostname(), Some("myhost"));
        assert_eq!(with_alias("7_db_primary").hostname(), Some("db_primary"));
    }

    #[test]
    fn hostname_requires_numeric_prefix() {
        assert_eq!(with_alias("myhost").hostname(), None);
        assert_eq!(with_alias("_myhost").hostname(), None);
        assert_eq!(with_alias("ab_myhost").hostname(), None);
    }
}
