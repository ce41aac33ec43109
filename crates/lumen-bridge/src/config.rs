use std::time::Duration;

use crate::surface::{PixelFormat, SurfaceUsage};
use crate::time::FrameClockConfig;

/// Environment variable overriding [`BridgeConfig::windowed_refresh_hz`].
pub const ENV_REFRESH_HZ: &str = "LUMEN_REFRESH_HZ";

/// Environment variable overriding [`BridgeConfig::frame_wait_budget`], in milliseconds.
pub const ENV_FRAME_WAIT_MS: &str = "LUMEN_FRAME_WAIT_MS";

/// Bridge configuration.
///
/// Keep this structure small. Immersive cadence and geometry come from the
/// [`SurfaceProvider`](crate::core::SurfaceProvider), not from here.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Tick rate of the windowed frame clock (display refresh).
    pub windowed_refresh_hz: f64,

    /// Pixel format of windowed surfaces.
    pub pixel_format: PixelFormat,

    /// Usage flag of windowed surfaces.
    pub usage: SurfaceUsage,

    /// Device scale used by `initialize` when the host does not pass one.
    pub default_scale_factor: f64,

    /// Upper bound on how long teardown waits for an in-flight frame.
    pub frame_wait_budget: Duration,

    /// Frame clock lateness after which its schedule is rebased.
    pub stall_reset: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            windowed_refresh_hz: 60.0,
            pixel_format: PixelFormat::Bgra8Unorm,
            usage: SurfaceUsage::FramebufferOnly,
            default_scale_factor: 1.0,
            frame_wait_budget: Duration::from_millis(250),
            stall_reset: Duration::from_millis(250),
        }
    }
}

impl BridgeConfig {
    /// Defaults with overrides read from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Unparseable values are logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_REFRESH_HZ) {
            match raw.trim().parse::<f64>() {
                Ok(hz) if hz.is_finite() && hz > 0.0 => {
                    log::info!("{ENV_REFRESH_HZ}={hz}");
                    self.windowed_refresh_hz = hz;
                }
                _ => log::warn!("{ENV_REFRESH_HZ}={raw}: not a positive number, ignoring"),
            }
        }

        if let Some(raw) = lookup(ENV_FRAME_WAIT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => {
                    log::info!("{ENV_FRAME_WAIT_MS}={ms}");
                    self.frame_wait_budget = Duration::from_millis(ms);
                }
                Err(_) => log::warn!("{ENV_FRAME_WAIT_MS}={raw}: not a millisecond count, ignoring"),
            }
        }

        self
    }

    pub(crate) fn clock_config(&self, refresh_hz: f64) -> FrameClockConfig {
        FrameClockConfig {
            refresh_hz,
            stall_reset: self.stall_reset,
        }
    }
}
