//! Desktop host for the lumen bridge.
//!
//! Opens a window, clears it every frame from the bridge's render thread and
//! forwards mouse/touch input. Press `I` to toggle the immersive stand-in,
//! `Esc` to leave it.

mod gpu;
mod renderer;
mod view;

use anyhow::Result;

use lumen_bridge::BridgeConfig;
use lumen_bridge::logging::{init_logging, LoggingConfig};

use crate::view::HostConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let bridge_config = BridgeConfig::from_env();
    log::info!(
        "windowed clock {} Hz, frame wait budget {:?}",
        bridge_config.windowed_refresh_hz,
        bridge_config.frame_wait_budget
    );

    view::run(HostConfig::default(), bridge_config)
}
