use std::sync::Arc;

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use lumen_bridge::coords::PixelSize;
use lumen_bridge::core::{ImmersiveLayer, SurfaceProvider};
use lumen_bridge::input::platform::WinitInputAdapter;
use lumen_bridge::mode::{HostSignal, ModeController, ModeRequester};
use lumen_bridge::{Bridge, BridgeConfig};

use crate::gpu::{Gpu, GpuInit};
use crate::renderer::ClearRenderer;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Cadence of the desktop immersive stand-in.
    pub immersive_refresh_hz: f64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "lumen".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            immersive_refresh_hz: 90.0,
        }
    }
}

/// Opens the window and runs the event loop until the window closes.
pub fn run(config: HostConfig, bridge_config: BridgeConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut view = HostView::new(config, bridge_config);

    event_loop
        .run_app(&mut view)
        .context("winit event loop terminated with error")?;

    Ok(())
}

/// Desktop stand-in for a compositor layer: two views side by side filling
/// the window.
struct DesktopLayer {
    window: Arc<Window>,
    refresh_hz: f64,
}

impl SurfaceProvider for DesktopLayer {
    fn layer(&mut self) -> ImmersiveLayer {
        let size = self.window.inner_size();
        ImmersiveLayer {
            scale_factor: self.window.scale_factor(),
            ..ImmersiveLayer::stereo(PixelSize::new(size.width / 2, size.height), self.refresh_hz)
        }
    }

    fn on_released(&mut self) {
        log::debug!("desktop immersive layer released");
    }
}

/// Host UI layer: maps winit window lifecycle and input onto the bridge.
struct HostView {
    config: HostConfig,
    bridge_config: BridgeConfig,
    window: Option<Arc<Window>>,
    bridge: Option<Bridge<ClearRenderer>>,
    modes: ModeController,
    requester: ModeRequester,
    immersive: Receiver<bool>,
    input: WinitInputAdapter,
    minimized: bool,
}

impl HostView {
    fn new(config: HostConfig, bridge_config: BridgeConfig) -> Self {
        let modes = ModeController::new();
        let requester = modes.requester();
        let immersive = modes.signal().subscribe();
        Self {
            config,
            bridge_config,
            window: None,
            bridge: None,
            modes,
            requester,
            immersive,
            input: WinitInputAdapter::new(),
            minimized: false,
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(Arc::clone(&window), GpuInit::default()))?;
        let mut bridge = Bridge::new(ClearRenderer::new(gpu), self.bridge_config.clone());

        let size = window.inner_size();
        bridge
            .on_view_created(size.width, size.height, window.scale_factor())
            .context("bridge rejected the initial surface")?;

        self.window = Some(window);
        self.bridge = Some(bridge);
        Ok(())
    }

    fn on_resized(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            if !self.minimized {
                self.minimized = true;
                self.requester.signal(HostSignal::ViewHidden);
            }
            return;
        }
        if self.minimized {
            self.minimized = false;
            self.requester.signal(HostSignal::ViewShown);
        }
        self.requester.resize(size.width, size.height);
    }

    fn toggle_immersive(&mut self) {
        let Some(window) = &self.window else {
            return;
        };

        if self.modes.signal().current() {
            self.requester.signal(HostSignal::ImmersiveSpaceDismissed);
        } else {
            self.requester.signal(HostSignal::ImmersiveSpaceOpened(Box::new(DesktopLayer {
                window: Arc::clone(window),
                refresh_hz: self.config.immersive_refresh_hz,
            })));
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut bridge) = self.bridge.take() {
            bridge.on_view_will_be_removed();
            let stats = bridge.stats();
            let presented = bridge.with_renderer(|r| r.frames());
            bridge.dispose();
            log::info!("closing: {presented} frame(s) presented, {stats:?}");
        }
        self.window = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for HostView {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.open(event_loop) {
                log::error!("failed to open the host view: {e:#}");
                event_loop.exit();
            }
            return;
        }

        // Resumed after `suspended`: the window survived, the surface did not.
        if let (Some(window), Some(bridge)) = (&self.window, self.bridge.as_mut()) {
            if !bridge.state().is_active() {
                let size = window.inner_size();
                if let Err(e) = bridge.on_view_created(size.width, size.height, window.scale_factor()) {
                    log::warn!("surface not restored on resume: {e}");
                }
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.on_view_will_be_removed();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                self.close(event_loop);
                return;
            }
            WindowEvent::Resized(size) => {
                self.on_resized(*size);
                return;
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(bridge) = self.bridge.as_mut() {
                    // Rejections are logged by the bridge.
                    let _ = bridge.set_scale_factor(*scale_factor);
                }
                return;
            }
            WindowEvent::Occluded(occluded) => {
                let signal = if *occluded {
                    HostSignal::ViewHidden
                } else {
                    HostSignal::ViewShown
                };
                self.requester.signal(signal);
                return;
            }
            WindowEvent::KeyboardInput { event: key, .. }
                if key.state == ElementState::Pressed && !key.repeat =>
            {
                match key.physical_key {
                    PhysicalKey::Code(KeyCode::KeyI) => self.toggle_immersive(),
                    PhysicalKey::Code(KeyCode::Escape) if self.modes.signal().current() => {
                        self.requester.signal(HostSignal::ImmersiveSpaceDismissed);
                    }
                    _ => {}
                }
                return;
            }
            _ => {}
        }

        let (Some(window), Some(bridge)) = (&self.window, self.bridge.as_mut()) else {
            return;
        };
        if let Some(raw) = self.input.translate_window_event(window.scale_factor(), &event) {
            bridge.handle_input(&raw);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        let Some(bridge) = self.bridge.as_mut() else {
            return;
        };

        for outcome in self.modes.pump(bridge) {
            if let Err(e) = outcome.result {
                log::warn!("{:?} not applied: {e}", outcome.request);
            }
        }

        if let Some(immersive) = self.immersive.try_iter().last() {
            if let Some(window) = &self.window {
                let title = if immersive {
                    format!("{} (immersive)", self.config.title)
                } else {
                    self.config.title.clone()
                };
                window.set_title(&title);
            }
        }
    }
}
