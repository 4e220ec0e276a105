// ── Domain model ──
//
// Types describing one inventory snapshot. Built fresh per invocation
// from a decoded payload and dropped once a verdict exists.

pub mod device;

pub use device::{Device, InventoryResponse};
