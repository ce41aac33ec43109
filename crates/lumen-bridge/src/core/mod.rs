//! Engine-facing contracts.
//!
//! This module defines the stable interface between the bridge and its two
//! external collaborators: the native renderer, and the platform object that
//! provides the immersive compositor layer.

mod provider;
mod renderer;

pub use provider::{ImmersiveLayer, SurfaceProvider};
pub use renderer::{Renderer, SurfaceRejected};
