//! Drawable surface ownership.
//!
//! This module is responsible for:
//! - describing the surface the renderer paints into (format, usage, size, scale)
//! - the create / resize / teardown lifecycle of that surface
//! - handing stable per-frame snapshots to the render side

mod format;
mod handle;

pub use format::{PixelFormat, PresentationMode, SurfaceUsage};
pub use handle::{Surface, SurfaceDesc, SurfaceHandle, SurfaceReader};
