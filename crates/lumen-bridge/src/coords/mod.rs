//! Coordinate and size types shared by the surface and input layers.
//!
//! Two spaces are in play:
//! - logical points (what the host UI reports)
//! - physical pixels (what the surface and renderer use)
//!
//! Origin is top-left, +X right, +Y down in both.

mod size;
mod vec2;

pub use size::PixelSize;
pub use vec2::Vec2;
