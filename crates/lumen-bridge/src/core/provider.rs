use crate::coords::PixelSize;
use crate::surface::{PixelFormat, PresentationMode, SurfaceDesc, SurfaceUsage};

/// Geometry and cadence of an immersive compositor layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ImmersiveLayer {
    /// Pixel size of one view (one eye).
    pub size: PixelSize,
    pub format: PixelFormat,
    pub scale_factor: f64,
    /// Views per frame; 2 for stereo.
    pub views: u32,
    /// Compositor frame rate in Hz.
    pub refresh_hz: f64,
}

impl ImmersiveLayer {
    pub fn stereo(size: PixelSize, refresh_hz: f64) -> Self {
        Self {
            size,
            format: PixelFormat::Bgra8Unorm,
            scale_factor: 1.0,
            views: 2,
            refresh_hz,
        }
    }

    pub(crate) fn surface_desc(&self) -> SurfaceDesc {
        SurfaceDesc {
            size: self.size,
            format: self.format,
            usage: SurfaceUsage::FramebufferOnly,
            scale_factor: self.scale_factor,
            views: self.views,
            mode: PresentationMode::Immersive,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.size.is_empty() {
            return Err("immersive layer has zero size");
        }
        if self.views == 0 {
            return Err("immersive layer has no views");
        }
        if !(self.refresh_hz.is_finite() && self.refresh_hz > 0.0) {
            return Err("immersive layer has no valid refresh rate");
        }
        Ok(())
    }
}

/// Source of the immersive surface, typically wrapping the platform's
/// compositor layer renderer.
///
/// The bridge keeps the provider for as long as immersive mode is active and
/// calls `on_released` after the immersive surface has been torn down.
pub trait SurfaceProvider: Send {
    fn layer(&mut self) -> ImmersiveLayer;

    fn on_released(&mut self) {}
}
