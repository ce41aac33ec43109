//! Logger setup for binaries built on the bridge.
//!
//! The library itself only emits through the `log` facade; hosts call
//! [`init_logging`] once from `main`.

mod setup;

pub use setup::{init_logging, LoggingConfig};
