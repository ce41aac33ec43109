use std::fmt;
use std::time::Duration;

use crate::coords::Vec2;

/// Identifier of one physical contact (finger, pointer, pinch).
pub type ContactId = u64;

/// Platform touch / pointer phase.
///
/// Only `Began`, `Moved` and `Ended` reach the renderer; the rest are
/// consumed by the translator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Cancelled,
    /// Pointer hovering without contact.
    Hover,
}

/// 3D pose attached to spatial input.
///
/// `location` is in metres in scene space; `orientation` is a unit
/// quaternion `[x, y, z, w]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpatialPose {
    pub location: [f32; 3],
    pub orientation: [f32; 4],
}

impl SpatialPose {
    pub const IDENTITY: Self = Self {
        location: [0.0, 0.0, 0.0],
        orientation: [0.0, 0.0, 0.0, 1.0],
    };

    pub fn is_finite(&self) -> bool {
        self.location.iter().chain(self.orientation.iter()).all(|v| v.is_finite())
    }
}

/// Raw pointer/touch sample as delivered by the host UI layer.
///
/// `position` is in logical points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RawPointer {
    pub id: ContactId,
    pub phase: TouchPhase,
    pub position: Vec2,
    pub timestamp: Duration,
}

/// Raw spatial sample (immersive mode).
///
/// `position` is the platform's 2D projection of the interaction onto the
/// presented content, in logical points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RawSpatial {
    pub id: ContactId,
    pub phase: TouchPhase,
    pub position: Vec2,
    pub pose: SpatialPose,
    pub timestamp: Duration,
}

/// Platform input before normalization.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RawInput {
    Pointer(RawPointer),
    Spatial(RawSpatial),
}

impl RawInput {
    pub fn id(&self) -> ContactId {
        match self {
            Self::Pointer(p) => p.id,
            Self::Spatial(s) => s.id,
        }
    }

    pub fn phase(&self) -> TouchPhase {
        match self {
            Self::Pointer(p) => p.phase,
            Self::Spatial(s) => s.phase,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum InputKind {
    Down,
    Move,
    Up,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Down => "down",
            Self::Move => "move",
            Self::Up => "up",
        };
        f.write_str(s)
    }
}

/// Normalized input record consumed by the renderer.
///
/// `position` is in surface pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub id: ContactId,
    pub position: Vec2,
    pub timestamp: Duration,
    /// Present for spatial input only.
    pub pose: Option<SpatialPose>,
}
