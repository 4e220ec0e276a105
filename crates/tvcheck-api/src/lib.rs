// tvcheck-api: Async client for the TeamViewer device inventory endpoint

pub mod client;
pub mod error;
pub mod transport;

pub use client::{DEFAULT_DEVICES_URL, InventoryClient};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
