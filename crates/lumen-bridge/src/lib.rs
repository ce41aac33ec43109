//! Lumen bridge crate.
//!
//! Connects a host UI layer to a native renderer: owns the drawable surface,
//! paces frame production, normalizes input and switches between windowed
//! and immersive presentation.

pub mod bridge;
pub mod config;
pub mod coords;
pub mod core;
pub mod error;
pub mod input;
pub mod logging;
pub mod mode;
pub mod surface;
pub mod time;

pub use bridge::{Bridge, BridgeState, BridgeStats};
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
