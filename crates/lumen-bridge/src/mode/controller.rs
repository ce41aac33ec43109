use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::bridge::Bridge;
use crate::core::{Renderer, SurfaceProvider};
use crate::error::Result;

use super::ModeSignal;

/// A change the host asks the bridge to make.
pub enum ModeRequest {
    EnterImmersive(Box<dyn SurfaceProvider>),
    ExitImmersive,
    Resize { width: u32, height: u32 },
    SetVisible(bool),
}

impl ModeRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::EnterImmersive(_) => RequestKind::EnterImmersive,
            Self::ExitImmersive => RequestKind::ExitImmersive,
            Self::Resize { .. } => RequestKind::Resize,
            Self::SetVisible(_) => RequestKind::SetVisible,
        }
    }
}

impl fmt::Debug for ModeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnterImmersive(_) => f.write_str("EnterImmersive(..)"),
            Self::ExitImmersive => f.write_str("ExitImmersive"),
            Self::Resize { width, height } => write!(f, "Resize({width}x{height})"),
            Self::SetVisible(v) => write!(f, "SetVisible({v})"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RequestKind {
    EnterImmersive,
    ExitImmersive,
    Resize,
    SetVisible,
}

/// Platform lifecycle notifications.
pub enum HostSignal {
    ImmersiveSpaceOpened(Box<dyn SurfaceProvider>),
    ImmersiveSpaceDismissed,
    ViewHidden,
    ViewShown,
}

impl From<HostSignal> for ModeRequest {
    fn from(signal: HostSignal) -> Self {
        match signal {
            HostSignal::ImmersiveSpaceOpened(provider) => Self::EnterImmersive(provider),
            HostSignal::ImmersiveSpaceDismissed => Self::ExitImmersive,
            HostSignal::ViewHidden => Self::SetVisible(false),
            HostSignal::ViewShown => Self::SetVisible(true),
        }
    }
}

/// Result of one applied request.
#[derive(Debug)]
pub struct Outcome {
    pub request: RequestKind,
    pub result: Result<()>,
}

/// Cloneable submission side of a [`ModeController`].
#[derive(Debug, Clone)]
pub struct ModeRequester {
    tx: Sender<ModeRequest>,
    transitioning: Arc<AtomicBool>,
}

impl ModeRequester {
    /// Queues `request`. Returns `false` when the controller is gone.
    pub fn request(&self, request: ModeRequest) -> bool {
        self.tx.send(request).is_ok()
    }

    pub fn signal(&self, signal: HostSignal) -> bool {
        self.request(signal.into())
    }

    pub fn enter_immersive(&self, provider: Box<dyn SurfaceProvider>) -> bool {
        self.request(ModeRequest::EnterImmersive(provider))
    }

    pub fn exit_immersive(&self) -> bool {
        self.request(ModeRequest::ExitImmersive)
    }

    pub fn resize(&self, width: u32, height: u32) -> bool {
        self.request(ModeRequest::Resize { width, height })
    }

    /// Whether the controller is applying a request right now.
    pub fn is_transitioning(&self) -> bool {
        self.transitioning.load(Ordering::Acquire)
    }
}

/// Serializes presentation-mode transitions.
///
/// Requests from any thread are queued and applied strictly in order by
/// [`pump`](Self::pump), one at a time, on the thread that owns the
/// [`Bridge`]. A request submitted while another is being applied (for
/// example from a provider or a signal subscriber) waits for it to finish.
#[derive(Debug)]
pub struct ModeController {
    tx: Sender<ModeRequest>,
    rx: Receiver<ModeRequest>,
    transitioning: Arc<AtomicBool>,
    signal: ModeSignal,
}

impl ModeController {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            transitioning: Arc::new(AtomicBool::new(false)),
            signal: ModeSignal::new(),
        }
    }

    pub fn requester(&self) -> ModeRequester {
        ModeRequester {
            tx: self.tx.clone(),
            transitioning: Arc::clone(&self.transitioning),
        }
    }

    pub fn signal(&self) -> ModeSignal {
        self.signal.clone()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning.load(Ordering::Acquire)
    }

    /// Requests waiting to be applied.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Applies every queued request, including ones queued while pumping.
    pub fn pump<R: Renderer>(&mut self, bridge: &mut Bridge<R>) -> Vec<Outcome> {
        let mut outcomes = Vec::new();

        while let Ok(request) = self.rx.try_recv() {
            let kind = request.kind();
            log::debug!("applying {request:?}");

            self.transitioning.store(true, Ordering::Release);
            let result = apply(bridge, request);
            self.transitioning.store(false, Ordering::Release);

            match &result {
                Err(e) if e.is_recoverable() => log::warn!("{kind:?} failed: {e}"),
                Err(e) => log::error!("{kind:?} failed: {e}"),
                Ok(()) => {}
            }
            self.signal
                .publish(bridge.state().is_active() && bridge.mode().is_immersive());

            outcomes.push(Outcome {
                request: kind,
                result,
            });
        }

        outcomes
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

fn apply<R: Renderer>(bridge: &mut Bridge<R>, request: ModeRequest) -> Result<()> {
    match request {
        ModeRequest::EnterImmersive(provider) => bridge.enter_immersive(provider).map(drop),
        ModeRequest::ExitImmersive => bridge.exit_immersive().map(drop),
        ModeRequest::Resize { width, height } => bridge.resize(width, height).map(drop),
        ModeRequest::SetVisible(visible) => {
            bridge.set_view_visible(visible);
            Ok(())
        }
    }
}
