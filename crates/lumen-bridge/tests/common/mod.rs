//! Shared fixtures for bridge integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use lumen_bridge::config::BridgeConfig;
use lumen_bridge::coords::PixelSize;
use lumen_bridge::core::{ImmersiveLayer, Renderer, SurfaceProvider, SurfaceRejected};
use lumen_bridge::input::InputEvent;
use lumen_bridge::surface::{PresentationMode, Surface};

/// One renderer callback, in the order the bridge made it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Available { generation: u64, size: PixelSize, mode: PresentationMode },
    Resized { generation: u64, size: PixelSize },
    Lost,
    Frame { generation: u64, size: PixelSize, views: u32 },
    Input(InputEvent),
}

/// Renderer that appends every callback to a shared log.
pub struct Recorder {
    log: Arc<Mutex<Vec<Call>>>,
    in_frame: Arc<AtomicBool>,
    overlapped: Arc<AtomicBool>,
    frame_cost: Duration,
}

/// Test-side view of a [`Recorder`]'s log.
#[derive(Clone)]
pub struct Journal {
    log: Arc<Mutex<Vec<Call>>>,
    overlapped: Arc<AtomicBool>,
}

impl Recorder {
    pub fn new() -> (Self, Journal) {
        Self::with_frame_cost(Duration::ZERO)
    }

    /// Every `render_frame` sleeps for `frame_cost`.
    pub fn with_frame_cost(frame_cost: Duration) -> (Self, Journal) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let overlapped = Arc::new(AtomicBool::new(false));
        let recorder = Self {
            log: Arc::clone(&log),
            in_frame: Arc::new(AtomicBool::new(false)),
            overlapped: Arc::clone(&overlapped),
            frame_cost,
        };
        (recorder, Journal { log, overlapped })
    }
}

impl Renderer for Recorder {
    fn on_surface_available(&mut self, surface: &Surface) -> Result<(), SurfaceRejected> {
        self.log.lock().push(Call::Available {
            generation: surface.generation(),
            size: surface.size(),
            mode: surface.mode(),
        });
        Ok(())
    }

    fn on_surface_resized(&mut self, surface: &Surface) -> Result<(), SurfaceRejected> {
        self.log.lock().push(Call::Resized {
            generation: surface.generation(),
            size: surface.size(),
        });
        Ok(())
    }

    fn on_surface_lost(&mut self) {
        self.log.lock().push(Call::Lost);
    }

    fn render_frame(&mut self, surface: &Surface) {
        if self.in_frame.swap(true, Ordering::AcqRel) {
            self.overlapped.store(true, Ordering::Release);
        }
        if !self.frame_cost.is_zero() {
            thread::sleep(self.frame_cost);
        }
        self.log.lock().push(Call::Frame {
            generation: surface.generation(),
            size: surface.size(),
            views: surface.views(),
        });
        self.in_frame.store(false, Ordering::Release);
    }

    fn dispatch_input(&mut self, event: InputEvent) {
        self.log.lock().push(Call::Input(event));
    }
}

impl Journal {
    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().clone()
    }

    pub fn frames(&self) -> Vec<(u64, PixelSize)> {
        self.log
            .lock()
            .iter()
            .filter_map(|c| match c {
                Call::Frame { generation, size, .. } => Some((*generation, *size)),
                _ => None,
            })
            .collect()
    }

    pub fn frame_count(&self) -> usize {
        self.frames().len()
    }

    pub fn inputs(&self) -> Vec<InputEvent> {
        self.log
            .lock()
            .iter()
            .filter_map(|c| match c {
                Call::Input(e) => Some(*e),
                _ => None,
            })
            .collect()
    }

    pub fn overlapped(&self) -> bool {
        self.overlapped.load(Ordering::Acquire)
    }

    /// Polls until `pred` holds or two seconds pass.
    pub fn wait_for(&self, pred: impl Fn(&[Call]) -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if pred(&self.log.lock()) {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        false
    }

    pub fn wait_for_frames(&self, n: usize) -> bool {
        self.wait_for(|calls| calls.iter().filter(|c| matches!(c, Call::Frame { .. })).count() >= n)
    }
}

/// Provider returning a fixed stereo layer.
pub struct StereoLayer(pub ImmersiveLayer);

impl StereoLayer {
    pub fn boxed(width: u32, height: u32) -> Box<dyn SurfaceProvider> {
        Box::new(Self(ImmersiveLayer::stereo(PixelSize::new(width, height), 240.0)))
    }
}

impl SurfaceProvider for StereoLayer {
    fn layer(&mut self) -> ImmersiveLayer {
        self.0
    }
}

/// Fast clock so tests see frames quickly.
pub fn fast_config() -> BridgeConfig {
    BridgeConfig {
        windowed_refresh_hz: 240.0,
        ..BridgeConfig::default()
    }
}
