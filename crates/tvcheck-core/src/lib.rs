//! Lookup-and-evaluate pipeline for the TeamViewer monitoring probe.
//!
//! One invocation runs a straight pipeline with no shared state:
//!
//! - **[`decode`]**: turns the raw `/api/v1/devices` body into an
//!   [`InventoryResponse`]. Lenient per field, strict about the document.
//! - **[`find_device`]**: picks the first [`Device`] satisfying a
//!   [`MatchCriterion`] (hostname pattern or TeamViewer ID).
//! - **[`evaluate`]**: maps the device's `online_state` to a [`Verdict`].
//!
//! [`check_payload`] chains the three over an already fetched body;
//! [`Probe`] adds the single HTTP fetch in front, driven by a [`ProbeConfig`].

pub mod config;
pub mod decode;
pub mod error;
pub mod evaluate;
pub mod matcher;
pub mod model;
pub mod probe;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ProbeConfig;
pub use decode::decode;
pub use error::CoreError;
pub use evaluate::{Status, Verdict, evaluate};
pub use matcher::{MatchCriterion, find_device};
pub use model::{Device, InventoryResponse};
pub use probe::{Probe, check_payload};

pub use tvcheck_api::{DEFAULT_DEVICES_URL, TlsMode};
