// ── Inventory payload decoding ──
//
// The document itself must be well-formed: a JSON object whose `devices`
// field, if present, is an array. Everything below that level is lenient.

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Device, InventoryResponse};

/// Decode a raw `/api/v1/devices` body.
///
/// A missing or `null` `devices` field is an empty inventory. Array
/// entries that are not objects are skipped.
pub fn decode(payload: &[u8]) -> Result<InventoryResponse, CoreError> {
    let mut document: Map<String, Value> =
        serde_json::from_slice(payload).map_err(|source| CoreError::Decode { source })?;

    let entries: Vec<Value> = match document.remove("devices") {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => {
            serde_json::from_value(value).map_err(|source| CoreError::Decode { source })?
        }
    };
    let mut devices = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            warn!(index, "skipping non-object device entry");
            continue;
        }
        // Every field is lenient, so an object always yields a device.
        match Device::deserialize(entry) {
            Ok(device) => devices.push(device),
            Err(e) => warn!(index, error = %e, "skipping undecodable device entry"),
        }
    }

    debug!(count = devices.len(), "decoded device list");
    Ok(InventoryResponse { devices })
}

/// Field deserializer that falls back to `T::default()` on `null` or a
/// type mismatch instead of failing the enclosing object.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decodes_all_known_fields() {
        let payload = br#"{"devices":[{
            "remotecontrol_id": "r123456789",
            "device_id": "d42",
            "alias": "12345_myhost",
            "groupid": "g7",
            "online_state": "Online",
            "assigned_to": true,
            "teamviewer_id": 123456789
        }]}"#;

        let inventory = decode(payload).unwrap();

        assert_eq!(
            inventory.devices,
            vec![Device {
                remote_control_id: "r123456789".into(),
                device_id: "d42".into(),
                alias: "12345_myhost".into(),
                group_id: "g7".into(),
                online_state: "Online".into(),
                assigned_to: true,
                teamviewer_id: 123_456_789,
            }]
        );
    }

    #[test]
    fn empty_device_array_is_empty_inventory() {
        let inventory = decode(br#"{"devices":[]}"#).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn missing_or_null_devices_field_is_empty_inventory() {
        assert!(decode(b"{}").unwrap().is_empty());
        assert!(decode(br#"{"devices":null}"#).unwrap().is_empty());
    }

    #[test]
    fn missing_fields_default_to_zero_values() {
        let inventory = decode(br#"{"devices":[{"alias":"5_host1"}]}"#).unwrap();

        assert_eq!(
            inventory.devices,
            vec![Device {
                alias: "5_host1".into(),
                ..Device::default()
            }]
        );
    }

    #[test]
    fn mistyped_field_does_not_abort_the_list() {
        let payload = br#"{"devices":[
            {"alias":"1_a","online_state":42,"assigned_to":"yes","teamviewer_id":"n/a"},
            {"alias":"2_b","online_state":"Online","groupid":null}
        ]}"#;

        let inventory = decode(payload).unwrap();

        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.devices[0].alias, "1_a");
        assert_eq!(inventory.devices[0].online_state, "");
        assert!(!inventory.devices[0].assigned_to);
        assert_eq!(inventory.devices[0].teamviewer_id, 0);
        assert_eq!(inventory.devices[1].online_state, "Online");
        assert_eq!(inventory.devices[1].group_id, "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let payload = br#"{"paging":{"next":null},"devices":[
            {"alias":"1_a","policy_id":"p1","last_seen":"2024-01-01T00:00:00Z"}
        ]}"#;

        let inventory = decode(payload).unwrap();
        assert_eq!(inventory.devices[0].alias, "1_a");
    }

    #[test]
    fn non_object_entries_are_skipped_in_order() {
        let payload = br#"{"devices":[{"alias":"1_a"}, 7, "x", null, {"alias":"2_b"}]}"#;

        let aliases: Vec<_> = decode(payload)
            .unwrap()
            .devices
            .into_iter()
            .map(|d| d.alias)
            .collect();

        assert_eq!(aliases, vec!["1_a", "2_b"]);
    }

    #[test]
    fn invalid_documents_are_decode_errors() {
        let payloads: [&[u8]; 7] = [
            b"not json",
            b"",
            br#"{"devices":[{"alias":"1_a"}"#,
            b"[]",
            b"null",
            br#"{"devices":{"alias":"1_a"}}"#,
            br#"{"devices":"none"}"#,
        ];

        for payload in payloads {
            let result = decode(payload);
            assert!(
                matches!(result, Err(CoreError::Decode { .. })),
                "payload {:?} gave {result:?}",
                String::from_utf8_lossy(payload)
            );
        }
    }
}
