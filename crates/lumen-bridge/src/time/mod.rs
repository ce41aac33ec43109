//! Time subsystem.
//!
//! Provides the periodic frame clock that drives frame production.
//! Intended usage:
//! - one `FrameClock` per presentation mode
//! - hold each `FrameTick` until the frame it requested has completed

mod frame_clock;

pub use frame_clock::{FrameClock, FrameClockConfig, FrameTick};
