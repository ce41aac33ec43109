use thiserror::Error;

use crate::input::InputEvent;
use crate::surface::Surface;

/// Returned by a renderer that cannot accept a surface.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct SurfaceRejected {
    pub reason: String,
}

impl SurfaceRejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Renderer contract implemented by the native engine side.
///
/// The bridge serializes every call: `render_frame` runs on the render
/// worker thread, all other callbacks run on the caller's UI thread, and no
/// two calls ever overlap. `render_frame` is only called between a
/// successful `on_surface_available` and the matching `on_surface_lost`.
pub trait Renderer: Send + 'static {
    /// A new surface is live and will be the target of the next frames.
    fn on_surface_available(&mut self, surface: &Surface) -> Result<(), SurfaceRejected>;

    /// The live surface changed size or scale. Identity is unchanged.
    fn on_surface_resized(&mut self, surface: &Surface) -> Result<(), SurfaceRejected> {
        let _ = surface;
        Ok(())
    }

    /// The surface is gone; release anything bound to it.
    fn on_surface_lost(&mut self);

    /// Produces and presents one frame. `surface` is valid for this call only.
    fn render_frame(&mut self, surface: &Surface);

    /// Delivers one normalized input event.
    fn dispatch_input(&mut self, event: InputEvent) {
        let _ = event;
    }
}
