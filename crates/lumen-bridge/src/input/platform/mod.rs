//! Host platform adapters producing [`RawInput`](super::RawInput) samples.

mod winit;

pub use self::winit::{WinitInputAdapter, MOUSE_CONTACT_ID};
