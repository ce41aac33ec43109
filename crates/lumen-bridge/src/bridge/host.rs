//! Entry points named after the host view's lifecycle callbacks.
//!
//! These are thin wrappers for hosts that expose a view-controller style
//! API: view creation, size changes, removal, and raw touch coordinates.

use crate::coords::Vec2;
use crate::core::Renderer;
use crate::error::Result;
use crate::input::{ContactId, InputEvent, RawInput, RawPointer, TouchPhase};
use crate::surface::Surface;

use super::Bridge;

impl<R: Renderer> Bridge<R> {
    /// The host view was created with the given pixel size and scale.
    pub fn on_view_created(&mut self, width: u32, height: u32, scale_factor: f64) -> Result<Surface> {
        self.initialize_scaled(width, height, scale_factor)
    }

    pub fn on_view_resized(&mut self, width: u32, height: u32) -> Result<Surface> {
        self.resize(width, height)
    }

    pub fn on_view_will_be_removed(&mut self) {
        self.teardown();
    }

    /// Touch began at `(x, y)` in logical points.
    pub fn on_touch_down(&mut self, id: ContactId, x: f32, y: f32) -> Option<InputEvent> {
        self.touch(id, TouchPhase::Began, x, y)
    }

    pub fn on_touch_move(&mut self, id: ContactId, x: f32, y: f32) -> Option<InputEvent> {
        self.touch(id, TouchPhase::Moved, x, y)
    }

    pub fn on_touch_up(&mut self, id: ContactId, x: f32, y: f32) -> Option<InputEvent> {
        self.touch(id, TouchPhase::Ended, x, y)
    }

    fn touch(&mut self, id: ContactId, phase: TouchPhase, x: f32, y: f32) -> Option<InputEvent> {
        let raw = RawInput::Pointer(RawPointer {
            id,
            phase,
            position: Vec2::new(x, y),
            timestamp: self.epoch.elapsed(),
        });
        self.handle_input(&raw)
    }
}
