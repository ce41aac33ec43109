//! Input subsystem.
//!
//! Public API is platform-agnostic. Hosts turn their native callbacks into
//! [`RawInput`] samples (see [`platform`]) and the [`EventTranslator`]
//! normalizes them into the renderer's down/move/up vocabulary.

pub mod platform;
mod translator;
mod types;

pub use translator::EventTranslator;
pub use types::{
    ContactId,
    InputEvent,
    InputKind,
    RawInput,
    RawPointer,
    RawSpatial,
    SpatialPose,
    TouchPhase,
};
