use lumen_bridge::coords::Vec2;
use lumen_bridge::core::{Renderer, SurfaceRejected};
use lumen_bridge::input::{InputEvent, InputKind};
use lumen_bridge::surface::{PixelFormat, PresentationMode, Surface, SurfaceUsage};

use crate::gpu::{Gpu, SurfaceErrorAction};

/// Clears the swapchain every frame.
///
/// The clear color follows the last pointer position so input round-trips
/// are visible; pressing brightens it and immersive mode shifts the hue.
pub struct ClearRenderer {
    gpu: Gpu,
    pointer: Option<Vec2>,
    pressed: bool,
    frames: u64,
}

impl ClearRenderer {
    pub fn new(gpu: Gpu) -> Self {
        Self {
            gpu,
            pointer: None,
            pressed: false,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn configure(&mut self, surface: &Surface) -> Result<(), SurfaceRejected> {
        let size = surface.size();
        // Stereo views are laid out side by side in one swapchain image.
        let width = size.width.saturating_mul(surface.views());
        let max = self.gpu.max_dimension();
        if width > max || size.height > max {
            return Err(SurfaceRejected::new(format!(
                "{width}x{} exceeds the device limit of {max}",
                size.height
            )));
        }

        self.gpu.configure(
            width,
            size.height,
            Some(texture_format(surface.format())),
            surface.usage() == SurfaceUsage::Readable,
        );
        log::debug!(
            "swapchain configured: {width}x{} {:?}",
            size.height,
            self.gpu.surface_format()
        );
        Ok(())
    }

    fn clear_color(&self, surface: &Surface) -> wgpu::Color {
        let size = surface.size();
        let (u, v) = match self.pointer {
            Some(p) => (
                (p.x / size.width as f32).clamp(0.0, 1.0) as f64,
                (p.y / size.height as f32).clamp(0.0, 1.0) as f64,
            ),
            None => (0.5, 0.5),
        };
        let boost = if self.pressed { 0.25 } else { 0.0 };

        match surface.mode() {
            PresentationMode::Windowed => wgpu::Color {
                r: 0.05 + 0.3 * u + boost,
                g: 0.08 + 0.2 * v + boost,
                b: 0.18 + boost,
                a: 1.0,
            },
            PresentationMode::Immersive => wgpu::Color {
                r: 0.22 + boost,
                g: 0.05 + 0.2 * v + boost,
                b: 0.25 + 0.3 * u + boost,
                a: 1.0,
            },
        }
    }
}

impl Renderer for ClearRenderer {
    fn on_surface_available(&mut self, surface: &Surface) -> Result<(), SurfaceRejected> {
        self.configure(surface)
    }

    fn on_surface_resized(&mut self, surface: &Surface) -> Result<(), SurfaceRejected> {
        self.configure(surface)
    }

    fn on_surface_lost(&mut self) {
        self.gpu.unconfigure();
        self.pointer = None;
        self.pressed = false;
    }

    fn render_frame(&mut self, surface: &Surface) {
        if !self.gpu.is_configured() {
            return;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => log::error!("swapchain out of memory"),
                    action => log::debug!("frame skipped: {action:?}"),
                }
                return;
            }
        };

        let color = self.clear_color(surface);
        {
            let _pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lumen clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.gpu.submit(frame);
        self.frames += 1;
    }

    fn dispatch_input(&mut self, event: InputEvent) {
        match event.kind {
            InputKind::Down => self.pressed = true,
            InputKind::Up => self.pressed = false,
            InputKind::Move => {}
        }
        self.pointer = Some(event.position);
    }
}

fn texture_format(format: PixelFormat) -> wgpu::TextureFormat {
    match format {
        PixelFormat::Bgra8Unorm => wgpu::TextureFormat::Bgra8Unorm,
        PixelFormat::Bgra8UnormSrgb => wgpu::TextureFormat::Bgra8UnormSrgb,
        PixelFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
        PixelFormat::Rgba16Float => wgpu::TextureFormat::Rgba16Float,
    }
}
