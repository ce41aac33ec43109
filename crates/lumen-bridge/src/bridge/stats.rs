use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared between the UI side, the clock thread and the render worker.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    frames_requested: AtomicU64,
    frames_rendered: AtomicU64,
    frames_discarded: AtomicU64,
    ticks_dropped: AtomicU64,
    input_forwarded: AtomicU64,
    input_dropped: AtomicU64,
    input_anomalies: AtomicU64,
}

impl Counters {
    pub(crate) fn record_requested(&self) {
        self.frames_requested.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rendered(&self) {
        self.frames_rendered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_discarded(&self) {
        self.frames_discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_tick_dropped(&self) {
        self.ticks_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_input_forwarded(&self) {
        self.input_forwarded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_input_dropped(&self) {
        self.input_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_input_anomaly(&self) {
        self.input_anomalies.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, ticks_suppressed: u64) -> BridgeStats {
        BridgeStats {
            frames_requested: self.frames_requested.load(Ordering::Relaxed),
            frames_rendered: self.frames_rendered.load(Ordering::Relaxed),
            frames_discarded: self.frames_discarded.load(Ordering::Relaxed),
            ticks_dropped: self.ticks_dropped.load(Ordering::Relaxed),
            ticks_suppressed,
            input_forwarded: self.input_forwarded.load(Ordering::Relaxed),
            input_dropped: self.input_dropped.load(Ordering::Relaxed),
            input_anomalies: self.input_anomalies.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of bridge activity.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct BridgeStats {
    /// Ticks turned into frame requests.
    pub frames_requested: u64,
    /// `render_frame` calls made.
    pub frames_rendered: u64,
    /// Requests whose surface was gone or replaced by the time they ran.
    pub frames_discarded: u64,
    /// Ticks that arrived with no surface to render.
    pub ticks_dropped: u64,
    /// Ticks skipped because the previous frame was still pending.
    pub ticks_suppressed: u64,
    pub input_forwarded: u64,
    /// Samples that arrived with no live surface.
    pub input_dropped: u64,
    pub input_anomalies: u64,
}
