use std::time::{Duration, Instant};

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, TouchPhase as WinitTouchPhase, WindowEvent};

use crate::coords::Vec2;
use crate::input::{ContactId, RawInput, RawPointer, TouchPhase};

/// Contact id used for the primary mouse button.
///
/// Touch ids come from the OS; the mouse gets one fixed id outside the range
/// platforms hand out for fingers in practice.
pub const MOUSE_CONTACT_ID: ContactId = u64::MAX;

/// Turns winit window events into [`RawInput`] samples.
///
/// winit reports positions in physical pixels; samples are emitted in logical
/// points so they go through the same scaling path as every other host.
#[derive(Debug)]
pub struct WinitInputAdapter {
    epoch: Instant,
    pointer_pos: Option<Vec2>,
    mouse_down: bool,
}

impl WinitInputAdapter {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            pointer_pos: None,
            mouse_down: false,
        }
    }

    /// Translates a winit `WindowEvent`.
    ///
    /// Returns `None` for events that carry no pointer or touch data.
    pub fn translate_window_event(
        &mut self,
        scale_factor: f64,
        event: &WindowEvent,
    ) -> Option<RawInput> {
        let timestamp = self.epoch.elapsed();

        match event {
            WindowEvent::Touch(touch) => Some(RawInput::Pointer(RawPointer {
                id: touch.id,
                phase: map_touch_phase(touch.phase),
                position: to_logical(touch.location, scale_factor),
                timestamp,
            })),

            WindowEvent::CursorMoved { position, .. } => {
                let position = to_logical(*position, scale_factor);
                self.pointer_pos = Some(position);
                let phase = if self.mouse_down {
                    TouchPhase::Moved
                } else {
                    TouchPhase::Hover
                };
                Some(self.mouse_sample(phase, position, timestamp))
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                // winit 0.30 does not expose a cursor query; use the tracked position.
                let position = self.pointer_pos.unwrap_or(Vec2::zero());
                let phase = match state {
                    ElementState::Pressed if !self.mouse_down => {
                        self.mouse_down = true;
                        TouchPhase::Began
                    }
                    ElementState::Released if self.mouse_down => {
                        self.mouse_down = false;
                        TouchPhase::Ended
                    }
                    // Repeated press/release without the opposite edge (focus games).
                    _ => return None,
                };
                Some(self.mouse_sample(phase, position, timestamp))
            }

            WindowEvent::CursorLeft { .. } if self.mouse_down => {
                self.mouse_down = false;
                let position = self.pointer_pos.take().unwrap_or(Vec2::zero());
                Some(self.mouse_sample(TouchPhase::Cancelled, position, timestamp))
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer_pos = None;
                None
            }

            _ => None,
        }
    }

    fn mouse_sample(&self, phase: TouchPhase, position: Vec2, timestamp: Duration) -> RawInput {
        RawInput::Pointer(RawPointer {
            id: MOUSE_CONTACT_ID,
            phase,
            position,
            timestamp,
        })
    }
}

impl Default for WinitInputAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn map_touch_phase(phase: WinitTouchPhase) -> TouchPhase {
    match phase {
        WinitTouchPhase::Started => TouchPhase::Began,
        WinitTouchPhase::Moved => TouchPhase::Moved,
        WinitTouchPhase::Ended => TouchPhase::Ended,
        WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

fn to_logical(pos: PhysicalPosition<f64>, scale_factor: f64) -> Vec2 {
    let logical = pos.to_logical::<f64>(scale_factor);
    Vec2::new(logical.x as f32, logical.y as f32)
}
