use std::fmt;

/// Pixel layout of a drawable surface.
///
/// The compositor layers this bridge targets expose a fixed 32-bit BGRA
/// layout by default; the other variants exist for hosts that hand over a
/// different layer configuration.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PixelFormat {
    #[default]
    Bgra8Unorm,
    Bgra8UnormSrgb,
    Rgba8Unorm,
    Rgba16Float,
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// How the renderer may use the surface's drawables.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SurfaceUsage {
    /// Render-target only; contents cannot be sampled or read back.
    #[default]
    FramebufferOnly,
    /// Contents may also be read back or sampled after presentation.
    Readable,
}

/// Presentation mode of the bridge.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PresentationMode {
    /// Conventional bounded 2D window.
    #[default]
    Windowed,
    /// Stereoscopic full-surround presentation.
    Immersive,
}

impl PresentationMode {
    pub const fn is_immersive(self) -> bool {
        matches!(self, Self::Immersive)
    }
}
