//! The bridge coordinator.
//!
//! [`Bridge`] owns the surface, the frame clock, the render worker and the
//! input translator, and sequences them so that the renderer only ever sees
//! a consistent surface. It is a plain context object: the host constructs
//! one and drives it from its UI thread.

mod host;
mod stats;
mod worker;

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::config::BridgeConfig;
use crate::coords::PixelSize;
use crate::core::{Renderer, SurfaceProvider};
use crate::error::{BridgeError, Result};
use crate::input::{EventTranslator, InputEvent, RawInput};
use crate::surface::{PresentationMode, Surface, SurfaceDesc, SurfaceHandle};
use crate::time::FrameClock;

pub use self::stats::BridgeStats;

use self::stats::Counters;
use self::worker::{RenderWorker, WorkerMsg};

/// Lifecycle state as seen by the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BridgeState {
    Uninitialized,
    Active(PresentationMode),
}

impl BridgeState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// What `activate` does with a surface the renderer refuses.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum OnRejected {
    /// Release it again; nothing stays live.
    Release,
    /// Keep it live but suspended until a resize is accepted.
    Suspend,
}

/// Windowed geometry kept aside while immersive mode is active.
#[derive(Debug, Copy, Clone)]
struct WindowedGeometry {
    size: PixelSize,
    scale_factor: f64,
}

pub struct Bridge<R: Renderer> {
    config: BridgeConfig,
    renderer: Arc<Mutex<R>>,
    surface: SurfaceHandle,
    translator: EventTranslator,
    clock: Option<FrameClock>,
    worker: Option<RenderWorker>,
    mode: PresentationMode,
    windowed: Option<WindowedGeometry>,
    provider: Option<Box<dyn SurfaceProvider>>,
    counters: Arc<Counters>,
    /// Suppressed ticks of clocks that have already been stopped.
    retired_suppressed: u64,
    /// The renderer refused the current geometry.
    rejected: bool,
    /// The host view is hidden.
    hidden: bool,
    /// Time base for input built by the host entry points.
    epoch: Instant,
}

impl<R: Renderer> Bridge<R> {
    pub fn new(renderer: R, config: BridgeConfig) -> Self {
        Self {
            config,
            renderer: Arc::new(Mutex::new(renderer)),
            surface: SurfaceHandle::new(),
            translator: EventTranslator::new(),
            clock: None,
            worker: None,
            mode: PresentationMode::Windowed,
            windowed: None,
            provider: None,
            counters: Arc::new(Counters::default()),
            retired_suppressed: 0,
            rejected: false,
            hidden: false,
            epoch: Instant::now(),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    // ── lifecycle ──────────────────────────────────────────────────────────

    /// Creates the windowed surface at the configured default scale.
    pub fn initialize(&mut self, width: u32, height: u32) -> Result<Surface> {
        self.initialize_scaled(width, height, self.config.default_scale_factor)
    }

    /// Creates the windowed surface and starts frame production.
    ///
    /// Fails with `AlreadyInitialized` when a surface is live. When the
    /// renderer rejects the surface it is released again and the bridge stays
    /// uninitialized.
    pub fn initialize_scaled(&mut self, width: u32, height: u32, scale_factor: f64) -> Result<Surface> {
        if self.surface.is_live() {
            return Err(BridgeError::AlreadyInitialized);
        }

        let desc = SurfaceDesc {
            usage: self.config.usage,
            ..SurfaceDesc::windowed(PixelSize::new(width, height), self.config.pixel_format, scale_factor)
        };
        let surface = self
            .activate(desc, self.config.windowed_refresh_hz, OnRejected::Release)
            .inspect_err(|e| log::warn!("initialize {width}x{height} failed: {e}"))?;

        self.mode = PresentationMode::Windowed;
        log::info!("bridge active: {width}x{height} @ {scale_factor}x");
        Ok(surface)
    }

    /// Applies a new view size.
    ///
    /// While immersive, the size is remembered for the windowed surface that
    /// will be restored on exit. A zero size or a renderer rejection returns
    /// `SurfaceUnavailable`; frames stay suppressed until a later resize is
    /// accepted.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<Surface> {
        let current = self.surface.snapshot().ok_or(BridgeError::NotInitialized)?;
        let size = PixelSize::new(width, height);

        if let Some(geometry) = self.windowed.as_mut() {
            if size.is_empty() {
                return Err(BridgeError::unavailable("zero-sized view"));
            }
            log::debug!("view resized to {width}x{height} while immersive; deferred");
            geometry.size = size;
            return Ok(current);
        }

        let mut renderer = self.renderer.lock();
        let surface = self
            .surface
            .resize(size)
            .inspect_err(|e| log::warn!("resize {width}x{height} refused: {e}"))?;
        let outcome = renderer.on_surface_resized(&surface);
        self.rejected = outcome.is_err();
        let suspend = self.should_suspend();
        self.surface.set_suspended(suspend);
        drop(renderer);

        match outcome {
            Ok(()) => {
                log::debug!("surface #{} resized to {width}x{height}", surface.generation());
                Ok(surface)
            }
            Err(rejected) => {
                log::warn!("renderer rejected {width}x{height}: {rejected}");
                Err(BridgeError::unavailable(rejected.reason))
            }
        }
    }

    /// Applies a new device-scale factor to the active surface.
    pub fn set_scale_factor(&mut self, scale_factor: f64) -> Result<Surface> {
        let current = self.surface.snapshot().ok_or(BridgeError::NotInitialized)?;

        if let Some(geometry) = self.windowed.as_mut() {
            if !(scale_factor.is_finite() && scale_factor > 0.0) {
                return Err(BridgeError::unavailable(format!("invalid scale factor {scale_factor}")));
            }
            geometry.scale_factor = scale_factor;
            return Ok(current);
        }

        let mut renderer = self.renderer.lock();
        let surface = self
            .surface
            .set_scale_factor(scale_factor)
            .inspect_err(|e| log::warn!("scale factor {scale_factor} refused: {e}"))?;
        let outcome = renderer.on_surface_resized(&surface);
        self.rejected = outcome.is_err();
        let suspend = self.should_suspend();
        self.surface.set_suspended(suspend);
        drop(renderer);

        outcome.map(|()| surface).map_err(|rejected| {
            log::warn!("renderer rejected scale factor {scale_factor}: {rejected}");
            BridgeError::unavailable(rejected.reason)
        })
    }

    /// Hides or shows the host view. A hidden windowed surface stays alive
    /// but produces no frames. Teardown resets the view to shown.
    pub fn set_view_visible(&mut self, visible: bool) {
        let _renderer = self.renderer.lock();
        self.hidden = !visible;
        let suspend = self.should_suspend();
        self.surface.set_suspended(suspend);
        log::debug!("view {}", if visible { "shown" } else { "hidden" });
    }

    /// Releases the surface and stops frame production. Idempotent.
    ///
    /// When this returns no `render_frame` call is running and none will
    /// start until the next `initialize`.
    pub fn teardown(&mut self) {
        let released = self.deactivate();
        if let Some(mut provider) = self.provider.take() {
            provider.on_released();
        }
        self.windowed = None;
        self.mode = PresentationMode::Windowed;
        self.hidden = false;

        if let Some(surface) = released {
            log::info!("bridge torn down (surface #{})", surface.generation());
        }
    }

    /// Tears down and releases the render worker. Idempotent.
    pub fn dispose(&mut self) {
        self.teardown();
        if let Some(worker) = self.worker.take() {
            worker.shutdown();
            log::debug!("bridge disposed");
        }
    }

    // ── presentation mode ──────────────────────────────────────────────────

    /// Swaps the windowed surface for the provider's immersive layer.
    ///
    /// The windowed clock is stopped and the windowed surface released
    /// before the immersive surface exists. If the immersive surface cannot
    /// be brought up, the windowed surface is restored and the error returned.
    pub fn enter_immersive(&mut self, mut provider: Box<dyn SurfaceProvider>) -> Result<Surface> {
        let windowed = self.surface.snapshot().ok_or(BridgeError::NotInitialized)?;
        if self.mode.is_immersive() {
            return Err(BridgeError::InvalidTransition {
                from: self.mode,
                requested: PresentationMode::Immersive,
            });
        }

        let layer = provider.layer();
        if let Err(reason) = layer.validate() {
            log::warn!("immersive layer refused: {reason}");
            return Err(BridgeError::unavailable(reason));
        }

        let geometry = WindowedGeometry {
            size: windowed.size(),
            scale_factor: windowed.scale_factor(),
        };
        self.deactivate();

        match self.activate(layer.surface_desc(), layer.refresh_hz, OnRejected::Release) {
            Ok(surface) => {
                self.mode = PresentationMode::Immersive;
                self.windowed = Some(geometry);
                self.provider = Some(provider);
                log::info!(
                    "entered immersive: {}x{} x{} view(s) @ {} Hz",
                    layer.size.width,
                    layer.size.height,
                    layer.views,
                    layer.refresh_hz
                );
                Ok(surface)
            }
            Err(e) => {
                log::warn!("entering immersive failed: {e}; restoring windowed surface");
                provider.on_released();
                self.restore_windowed(geometry);
                Err(e)
            }
        }
    }

    /// Returns to a windowed surface with the geometry remembered on entry.
    ///
    /// If the renderer rejects the windowed surface it stays live but
    /// suspended, and `SurfaceUnavailable` is returned. An accepted `resize`
    /// resumes frames.
    pub fn exit_immersive(&mut self) -> Result<Surface> {
        if !self.surface.is_live() {
            return Err(BridgeError::NotInitialized);
        }
        let Some(geometry) = self.windowed.take() else {
            return Err(BridgeError::InvalidTransition {
                from: self.mode,
                requested: PresentationMode::Windowed,
            });
        };

        self.deactivate();
        if let Some(mut provider) = self.provider.take() {
            provider.on_released();
        }
        self.mode = PresentationMode::Windowed;

        let desc = self.windowed_desc(geometry);
        let surface = self.activate(desc, self.config.windowed_refresh_hz, OnRejected::Suspend)?;
        log::info!(
            "exited immersive: {}x{} @ {}x",
            geometry.size.width,
            geometry.size.height,
            geometry.scale_factor
        );
        Ok(surface)
    }

    // ── input ──────────────────────────────────────────────────────────────

    /// Translates one platform sample and forwards it to the renderer.
    ///
    /// Returns the forwarded event. Samples arriving with no live surface are
    /// dropped; anomalous samples are logged and dropped.
    pub fn handle_input(&mut self, raw: &RawInput) -> Option<InputEvent> {
        let Some(scale_factor) = self.surface.scale_factor() else {
            log::trace!("input for contact {} dropped: no surface", raw.id());
            self.counters.record_input_dropped();
            return None;
        };

        match self.translator.translate(raw, scale_factor) {
            Ok(Some(event)) => {
                self.renderer.lock().dispatch_input(event);
                self.counters.record_input_forwarded();
                Some(event)
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("{e}");
                self.counters.record_input_anomaly();
                None
            }
        }
    }

    // ── queries ────────────────────────────────────────────────────────────

    pub fn state(&self) -> BridgeState {
        if self.surface.is_live() {
            BridgeState::Active(self.mode)
        } else {
            BridgeState::Uninitialized
        }
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// Snapshot of the live surface.
    pub fn surface(&self) -> Option<Surface> {
        self.surface.snapshot()
    }

    /// Whether frames are currently being withheld from the renderer.
    pub fn is_suspended(&self) -> bool {
        self.surface.is_suspended()
    }

    pub fn stats(&self) -> BridgeStats {
        let live = self.clock.as_ref().map_or(0, FrameClock::ticks_suppressed);
        self.counters.snapshot(self.retired_suppressed + live)
    }

    /// Runs `f` with exclusive access to the renderer.
    ///
    /// Blocks while a frame is being rendered.
    pub fn with_renderer<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        f(&mut self.renderer.lock())
    }

    // ── internals ──────────────────────────────────────────────────────────

    fn should_suspend(&self) -> bool {
        let windowed = self
            .surface
            .snapshot()
            .is_some_and(|s| !s.mode().is_immersive());
        self.rejected || (self.hidden && windowed)
    }

    fn windowed_desc(&self, geometry: WindowedGeometry) -> SurfaceDesc {
        SurfaceDesc {
            usage: self.config.usage,
            ..SurfaceDesc::windowed(geometry.size, self.config.pixel_format, geometry.scale_factor)
        }
    }

    fn restore_windowed(&mut self, geometry: WindowedGeometry) {
        self.mode = PresentationMode::Windowed;
        let desc = self.windowed_desc(geometry);
        if let Err(e) = self.activate(desc, self.config.windowed_refresh_hz, OnRejected::Suspend) {
            if self.surface.is_live() {
                log::warn!("restored windowed surface is suspended: {e}");
            } else {
                log::error!("windowed surface could not be restored: {e}");
            }
        }
    }

    fn ensure_worker(&mut self) -> Result<&RenderWorker> {
        if self.worker.is_none() {
            let worker = RenderWorker::spawn(
                Arc::clone(&self.renderer),
                self.surface.reader(),
                Arc::clone(&self.counters),
            )?;
            self.worker = Some(worker);
        }
        self.worker.as_ref().ok_or(BridgeError::NotInitialized)
    }

    /// Creates a surface, hands it to the renderer and starts the clock.
    ///
    /// An unusable refresh rate fails before any surface exists. A renderer
    /// rejection is handled per `on_rejected`; any other failure leaves
    /// nothing live.
    fn activate(&mut self, desc: SurfaceDesc, refresh_hz: f64, on_rejected: OnRejected) -> Result<Surface> {
        let clock_config = self.config.clock_config(refresh_hz);
        let interval = clock_config.interval()?;
        let frames = self.ensure_worker()?.sender();

        let (surface, outcome) = {
            let mut renderer = self.renderer.lock();
            let surface = self.surface.create(desc)?;
            let outcome = renderer.on_surface_available(&surface);
            if let Err(rejected) = &outcome {
                if on_rejected == OnRejected::Release {
                    self.surface.teardown();
                    return Err(BridgeError::unavailable(rejected.reason.clone()));
                }
            }
            self.rejected = outcome.is_err();
            let suspend = self.should_suspend();
            self.surface.set_suspended(suspend);
            (surface, outcome)
        };

        let mut clock = FrameClock::new(clock_config);
        let reader = self.surface.reader();
        let counters = Arc::clone(&self.counters);
        let started = clock.start(move |tick| match reader.frame_target() {
            Some(target) => {
                counters.record_requested();
                let msg = WorkerMsg::Frame {
                    tick,
                    generation: target.generation(),
                };
                if frames.send(msg).is_err() {
                    log::trace!("render worker gone, frame request dropped");
                }
            }
            None => counters.record_tick_dropped(),
        });

        if let Err(e) = started {
            let mut renderer = self.renderer.lock();
            self.surface.teardown();
            renderer.on_surface_lost();
            return Err(e);
        }

        self.clock = Some(clock);
        match outcome {
            Ok(()) => {
                log::debug!("surface #{} live, ticking every {interval:?}", surface.generation());
                Ok(surface)
            }
            Err(rejected) => {
                log::warn!(
                    "renderer rejected surface #{}: {rejected}; suspended until resized",
                    surface.generation()
                );
                Err(BridgeError::unavailable(rejected.reason))
            }
        }
    }

    /// Stops the clock, drains in-flight frames and releases the surface.
    fn deactivate(&mut self) -> Option<Surface> {
        if let Some(mut clock) = self.clock.take() {
            clock.stop();
            self.retired_suppressed += clock.ticks_suppressed();
        }

        if let Some(worker) = &self.worker {
            let budget = self.config.frame_wait_budget;
            if !worker.quiesce(budget) {
                log::warn!("render worker still busy after {budget:?}; waiting for the renderer");
            }
        }

        let released = {
            let mut renderer = self.renderer.lock();
            let released = self.surface.teardown();
            if released.is_some() {
                renderer.on_surface_lost();
            }
            released
        };

        self.translator.reset();
        self.rejected = false;
        released
    }
}

impl<R: Renderer> Drop for Bridge<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<R: Renderer> std::fmt::Debug for Bridge<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("state", &self.state())
            .field("surface", &self.surface.snapshot())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::{ImmersiveLayer, SurfaceRejected};
    use crate::coords::Vec2;
    use crate::input::{RawPointer, TouchPhase};

    #[derive(Default)]
    struct Tally {
        available: u32,
        resized: u32,
        lost: u32,
        frames: u32,
        reject_width: Option<u32>,
        /// Ordinals of `on_surface_available` calls to refuse, counting from 1.
        reject_available: Vec<u32>,
        inputs: Vec<InputEvent>,
    }

    impl Renderer for Tally {
        fn on_surface_available(&mut self, _surface: &Surface) -> Result<(), SurfaceRejected> {
            self.available += 1;
            if self.reject_available.contains(&self.available) {
                return Err(SurfaceRejected::new("busy"));
            }
            Ok(())
        }

        fn on_surface_resized(&mut self, surface: &Surface) -> Result<(), SurfaceRejected> {
            self.resized += 1;
            if self.reject_width == Some(surface.size().width) {
                return Err(SurfaceRejected::new("unsupported width"));
            }
            Ok(())
        }

        fn on_surface_lost(&mut self) {
            self.lost += 1;
        }

        fn render_frame(&mut self, _surface: &Surface) {
            self.frames += 1;
        }

        fn dispatch_input(&mut self, event: InputEvent) {
            self.inputs.push(event);
        }
    }

    struct Layer(ImmersiveLayer);

    impl SurfaceProvider for Layer {
        fn layer(&mut self) -> ImmersiveLayer {
            self.0
        }
    }

    fn bridge() -> Bridge<Tally> {
        let config = BridgeConfig {
            windowed_refresh_hz: 500.0,
            ..BridgeConfig::default()
        };
        Bridge::new(Tally::default(), config)
    }

    fn stereo(width: u32, height: u32) -> Box<dyn SurfaceProvider> {
        Box::new(Layer(ImmersiveLayer::stereo(PixelSize::new(width, height), 90.0)))
    }

    fn pointer(id: u64, phase: TouchPhase, x: f32, y: f32) -> RawInput {
        RawInput::Pointer(RawPointer {
            id,
            phase,
            position: Vec2::new(x, y),
            timestamp: Duration::ZERO,
        })
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn initialize_then_teardown() {
        let mut bridge = bridge();
        assert_eq!(bridge.state(), BridgeState::Uninitialized);

        let surface = bridge.initialize(800, 600).unwrap();
        assert_eq!(surface.size(), PixelSize::new(800, 600));
        assert_eq!(bridge.state(), BridgeState::Active(PresentationMode::Windowed));

        bridge.teardown();
        assert_eq!(bridge.state(), BridgeState::Uninitialized);
        bridge.teardown();

        bridge.with_renderer(|r| {
            assert_eq!(r.available, 1);
            assert_eq!(r.lost, 1);
        });
    }

    #[test]
    fn resize_requires_initialize() {
        let mut bridge = bridge();
        assert!(matches!(bridge.resize(10, 10), Err(BridgeError::NotInitialized)));
    }

    #[test]
    fn zero_resize_keeps_previous_size() {
        let mut bridge = bridge();
        bridge.initialize(800, 600).unwrap();
        assert!(matches!(
            bridge.resize(0, 600),
            Err(BridgeError::SurfaceUnavailable { .. })
        ));
        assert_eq!(bridge.surface().unwrap().size(), PixelSize::new(800, 600));
    }

    #[test]
    fn rejected_resize_suspends_until_corrected() {
        let mut bridge = bridge();
        bridge.with_renderer(|r| r.reject_width = Some(333));
        bridge.initialize(800, 600).unwrap();

        assert!(bridge.resize(333, 200).is_err());
        assert!(bridge.is_suspended());
        assert!(bridge.state().is_active());

        bridge.resize(640, 480).unwrap();
        assert!(!bridge.is_suspended());
    }

    #[test]
    fn hidden_view_is_suspended() {
        let mut bridge = bridge();
        bridge.initialize(100, 100).unwrap();
        bridge.set_view_visible(false);
        assert!(bridge.is_suspended());
        bridge.set_view_visible(true);
        assert!(!bridge.is_suspended());
    }

    #[test]
    fn teardown_resets_visibility() {
        let mut bridge = bridge();
        bridge.initialize(100, 100).unwrap();
        bridge.set_view_visible(false);
        bridge.teardown();

        bridge.initialize(100, 100).unwrap();
        assert!(!bridge.is_suspended());
    }

    #[test]
    fn invalid_refresh_rate_fails_before_surface_exists() {
        for hz in [0.0, -60.0, f64::NAN] {
            let config = BridgeConfig {
                windowed_refresh_hz: hz,
                ..BridgeConfig::default()
            };
            let mut bridge = Bridge::new(Tally::default(), config);

            assert!(matches!(
                bridge.initialize(800, 600),
                Err(BridgeError::SurfaceUnavailable { .. })
            ));
            assert_eq!(bridge.state(), BridgeState::Uninitialized);
            assert!(bridge.clock.is_none());
            bridge.with_renderer(|r| assert_eq!(r.available, 0));
        }
    }

    // ── immersive ─────────────────────────────────────────────────────────

    #[test]
    fn exit_requires_immersive() {
        let mut bridge = bridge();
        bridge.initialize(100, 100).unwrap();
        assert!(matches!(
            bridge.exit_immersive(),
            Err(BridgeError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn invalid_layer_keeps_windowed_surface() {
        let mut bridge = bridge();
        let before = bridge.initialize(100, 100).unwrap();

        let layer = ImmersiveLayer::stereo(PixelSize::new(0, 0), 90.0);
        assert!(bridge.enter_immersive(Box::new(Layer(layer))).is_err());
        assert_eq!(bridge.surface(), Some(before));
    }

    #[test]
    fn rejected_immersive_surface_restores_windowed() {
        let mut bridge = bridge();
        bridge.with_renderer(|r| r.reject_available = vec![2]);
        let before = bridge.initialize_scaled(800, 600, 2.0).unwrap();

        assert!(matches!(
            bridge.enter_immersive(stereo(1920, 1824)),
            Err(BridgeError::SurfaceUnavailable { .. })
        ));
        assert_eq!(bridge.state(), BridgeState::Active(PresentationMode::Windowed));
        assert!(!bridge.is_suspended());

        let restored = bridge.surface().unwrap();
        assert_eq!(restored.mode(), PresentationMode::Windowed);
        assert_eq!(restored.size(), before.size());
        assert_eq!(restored.scale_factor(), 2.0);
        assert_ne!(restored.generation(), before.generation());
        assert!(matches!(
            bridge.exit_immersive(),
            Err(BridgeError::InvalidTransition { .. })
        ));

        // The refused immersive surface is never reported lost.
        bridge.with_renderer(|r| {
            assert_eq!(r.available, 3);
            assert_eq!(r.lost, 1);
        });
    }

    #[test]
    fn rejected_restore_stays_recoverable() {
        let mut bridge = bridge();
        bridge.with_renderer(|r| r.reject_available = vec![2, 3]);
        bridge.initialize(800, 600).unwrap();

        assert!(bridge.enter_immersive(stereo(1920, 1824)).is_err());
        assert_eq!(bridge.state(), BridgeState::Active(PresentationMode::Windowed));
        assert!(bridge.is_suspended());

        bridge.resize(640, 480).unwrap();
        assert!(!bridge.is_suspended());
    }

    #[test]
    fn rejected_exit_keeps_windowed_surface_suspended() {
        let mut bridge = bridge();
        bridge.with_renderer(|r| r.reject_available = vec![3]);
        bridge.initialize(800, 600).unwrap();
        bridge.enter_immersive(stereo(1920, 1824)).unwrap();

        assert!(matches!(
            bridge.exit_immersive(),
            Err(BridgeError::SurfaceUnavailable { .. })
        ));
        assert_eq!(bridge.state(), BridgeState::Active(PresentationMode::Windowed));
        assert!(bridge.is_suspended());
        assert_eq!(bridge.surface().unwrap().size(), PixelSize::new(800, 600));

        let corrected = bridge.resize(1024, 768).unwrap();
        assert_eq!(corrected.mode(), PresentationMode::Windowed);
        assert!(!bridge.is_suspended());

        bridge.teardown();
        bridge.with_renderer(|r| assert_eq!(r.lost, 3));
    }

    #[test]
    fn resize_while_immersive_is_applied_on_exit() {
        let mut bridge = bridge();
        bridge.initialize(800, 600).unwrap();
        bridge.enter_immersive(stereo(1920, 1824)).unwrap();

        let immersive = bridge.resize(1280, 720).unwrap();
        assert_eq!(immersive.size(), PixelSize::new(1920, 1824));

        let restored = bridge.exit_immersive().unwrap();
        assert_eq!(restored.size(), PixelSize::new(1280, 720));
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn input_without_surface_is_dropped() {
        let mut bridge = bridge();
        assert!(bridge.handle_input(&pointer(1, TouchPhase::Began, 1.0, 1.0)).is_none());
        assert_eq!(bridge.stats().input_dropped, 1);
    }

    #[test]
    fn input_is_scaled_and_forwarded() {
        let mut bridge = bridge();
        bridge.initialize_scaled(200, 200, 2.0).unwrap();

        let event = bridge
            .handle_input(&pointer(1, TouchPhase::Began, 10.0, 20.0))
            .unwrap();
        assert_eq!(event.position, Vec2::new(20.0, 40.0));

        assert!(bridge.handle_input(&pointer(9, TouchPhase::Moved, 1.0, 1.0)).is_none());

        let stats = bridge.stats();
        assert_eq!(stats.input_forwarded, 1);
        assert_eq!(stats.input_anomalies, 1);
        bridge.with_renderer(|r| assert_eq!(r.inputs.len(), 1));
    }
}
