use std::sync::Arc;

use parking_lot::Mutex;

use crate::coords::PixelSize;
use crate::error::{BridgeError, Result};

use super::{PixelFormat, PresentationMode, SurfaceUsage};

/// Parameters for creating a surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceDesc {
    pub size: PixelSize,
    pub format: PixelFormat,
    pub usage: SurfaceUsage,
    /// Device-scale factor (pixels per logical point).
    pub scale_factor: f64,
    /// Number of views rendered per frame (2 for stereo layers).
    pub views: u32,
    pub mode: PresentationMode,
}

impl SurfaceDesc {
    /// A single-view windowed surface.
    pub fn windowed(size: PixelSize, format: PixelFormat, scale_factor: f64) -> Self {
        Self {
            size,
            format,
            usage: SurfaceUsage::FramebufferOnly,
            scale_factor,
            views: 1,
            mode: PresentationMode::Windowed,
        }
    }
}

/// One live drawable target.
///
/// This is a value snapshot: copying it out of the handle is how the render
/// side holds a stable view of the surface for the duration of one frame.
/// `generation` identifies the surface instance and never changes on resize.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Surface {
    generation: u64,
    size: PixelSize,
    format: PixelFormat,
    usage: SurfaceUsage,
    scale_factor: f64,
    views: u32,
    mode: PresentationMode,
}

impl Surface {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Size of one view in physical pixels.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn usage(&self) -> SurfaceUsage {
        self.usage
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn views(&self) -> u32 {
        self.views
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }
}

#[derive(Debug, Default)]
struct Slot {
    surface: Option<Surface>,
    suspended: bool,
}

/// Owns the drawable surface and publishes snapshots to the render side.
///
/// Mutations (`create`, `resize`, `teardown`) are UI-context operations and
/// take `&mut self`. The render side reads through a [`SurfaceReader`], which
/// copies the current surface under a short lock; a resize therefore takes
/// effect on the next frame and never alters a frame already in flight.
#[derive(Debug)]
pub struct SurfaceHandle {
    slot: Arc<Mutex<Slot>>,
    next_generation: u64,
}

impl SurfaceHandle {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            next_generation: 1,
        }
    }

    /// Allocates a new surface.
    pub fn create(&mut self, desc: SurfaceDesc) -> Result<Surface> {
        let mut slot = self.slot.lock();
        if slot.surface.is_some() {
            return Err(BridgeError::AlreadyInitialized);
        }
        validate_size(desc.size)?;
        validate_scale(desc.scale_factor)?;
        if desc.views == 0 {
            return Err(BridgeError::unavailable("surface needs at least one view"));
        }

        let surface = Surface {
            generation: self.next_generation,
            size: desc.size,
            format: desc.format,
            usage: desc.usage,
            scale_factor: desc.scale_factor,
            views: desc.views,
            mode: desc.mode,
        };
        self.next_generation = self.next_generation.wrapping_add(1);

        slot.surface = Some(surface);
        slot.suspended = false;

        log::debug!(
            "surface #{} created: {}x{} {} x{} view(s) @ {}x",
            surface.generation,
            surface.size.width,
            surface.size.height,
            surface.format,
            surface.views,
            surface.scale_factor
        );
        Ok(surface)
    }

    /// Updates the size of the live surface. Identity is preserved.
    ///
    /// A zero size is rejected and leaves the previous size in place.
    pub fn resize(&mut self, size: PixelSize) -> Result<Surface> {
        let mut slot = self.slot.lock();
        let surface = slot.surface.as_mut().ok_or(BridgeError::NotInitialized)?;
        validate_size(size)?;

        surface.size = size;
        Ok(*surface)
    }

    /// Updates the device-scale factor used for point-to-pixel conversion.
    pub fn set_scale_factor(&mut self, scale_factor: f64) -> Result<Surface> {
        let mut slot = self.slot.lock();
        let surface = slot.surface.as_mut().ok_or(BridgeError::NotInitialized)?;
        validate_scale(scale_factor)?;

        surface.scale_factor = scale_factor;
        Ok(*surface)
    }

    /// Releases the surface. Idempotent.
    pub fn teardown(&mut self) -> Option<Surface> {
        let mut slot = self.slot.lock();
        slot.suspended = false;
        let released = slot.surface.take();
        if let Some(s) = &released {
            log::debug!("surface #{} released", s.generation);
        }
        released
    }

    /// Keeps the surface alive but hides it from frame production.
    pub(crate) fn set_suspended(&mut self, suspended: bool) {
        self.slot.lock().suspended = suspended;
    }

    pub fn is_suspended(&self) -> bool {
        self.slot.lock().suspended
    }

    pub fn is_live(&self) -> bool {
        self.slot.lock().surface.is_some()
    }

    pub fn snapshot(&self) -> Option<Surface> {
        self.slot.lock().surface
    }

    /// Current scale factor, or `None` when no surface is live.
    pub fn scale_factor(&self) -> Option<f64> {
        self.slot.lock().surface.map(|s| s.scale_factor)
    }

    pub fn reader(&self) -> SurfaceReader {
        SurfaceReader {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl Default for SurfaceHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of a [`SurfaceHandle`] for the render side.
#[derive(Debug, Clone)]
pub struct SurfaceReader {
    slot: Arc<Mutex<Slot>>,
}

impl SurfaceReader {
    /// Copies the surface a frame should target, if any.
    ///
    /// Returns `None` when no surface is live or the surface is suspended.
    pub fn frame_target(&self) -> Option<Surface> {
        let slot = self.slot.lock();
        if slot.suspended {
            return None;
        }
        slot.surface
    }
}

fn validate_size(size: PixelSize) -> Result<()> {
    if size.is_empty() {
        return Err(BridgeError::unavailable(format!(
            "zero-sized surface ({}x{})",
            size.width, size.height
        )));
    }
    Ok(())
}

fn validate_scale(scale: f64) -> Result<()> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(BridgeError::unavailable(format!("invalid scale factor {scale}")));
    }
    Ok(())
}
