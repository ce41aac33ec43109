use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};

use crate::error::{BridgeError, Result};

/// One frame request.
///
/// The tick has no payload for the renderer. While it is alive the clock's
/// pending-frame gate stays closed and further ticks are suppressed; drop it
/// once the frame it triggered has completed.
#[derive(Debug)]
pub struct FrameTick {
    index: u64,
    gate: Arc<AtomicBool>,
}

impl FrameTick {
    /// Monotonic tick counter, for diagnostics.
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl Drop for FrameTick {
    fn drop(&mut self) {
        self.gate.store(false, Ordering::Release);
    }
}

/// Clock configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameClockConfig {
    /// Tick rate in Hz.
    pub refresh_hz: f64,

    /// Lateness after which the schedule is rebased instead of catching up.
    ///
    /// Prevents a burst of back-to-back ticks after the process was paused by
    /// a debugger or the system.
    pub stall_reset: Duration,
}

impl FrameClockConfig {
    pub fn with_refresh_hz(refresh_hz: f64) -> Self {
        Self {
            refresh_hz,
            ..Self::default()
        }
    }

    /// Tick period. Fails unless the refresh rate is finite and positive.
    pub fn interval(&self) -> Result<Duration> {
        let hz = self.refresh_hz;
        if !(hz.is_finite() && hz > 0.0) {
            return Err(BridgeError::unavailable(format!("invalid refresh rate {hz} Hz")));
        }
        Duration::try_from_secs_f64(1.0 / hz)
            .map_err(|_| BridgeError::unavailable(format!("invalid refresh rate {hz} Hz")))
    }
}

impl Default for FrameClockConfig {
    fn default() -> Self {
        Self {
            refresh_hz: 60.0,
            stall_reset: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    delivered: AtomicU64,
    suppressed: AtomicU64,
}

struct Running {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
    thread_id: ThreadId,
}

/// Periodic tick source standing in for the platform display link.
///
/// Ticks are delivered on a dedicated thread. `stop` joins that thread, so
/// once it returns no tick callback is executing or will execute.
pub struct FrameClock {
    config: FrameClockConfig,
    gate: Arc<AtomicBool>,
    counters: Arc<Counters>,
    running: Option<Running>,
}

impl FrameClock {
    /// Creates a stopped clock.
    pub fn new(config: FrameClockConfig) -> Self {
        Self {
            config,
            gate: Arc::new(AtomicBool::new(false)),
            counters: Arc::new(Counters::default()),
            running: None,
        }
    }

    pub fn config(&self) -> FrameClockConfig {
        self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Ticks handed to the callback so far.
    pub fn ticks_delivered(&self) -> u64 {
        self.counters.delivered.load(Ordering::Relaxed)
    }

    /// Ticks skipped because the previous frame was still pending.
    pub fn ticks_suppressed(&self) -> u64 {
        self.counters.suppressed.load(Ordering::Relaxed)
    }

    /// Whether a delivered tick is still alive.
    pub fn frame_pending(&self) -> bool {
        self.gate.load(Ordering::Acquire)
    }

    /// Starts periodic delivery.
    ///
    /// Fails with `SurfaceUnavailable` for an unusable refresh rate and with
    /// `AlreadyRunning` when the clock is already ticking.
    pub fn start<F>(&mut self, mut on_tick: F) -> Result<()>
    where
        F: FnMut(FrameTick) + Send + 'static,
    {
        if self.running.is_some() {
            return Err(BridgeError::AlreadyRunning);
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let gate = Arc::clone(&self.gate);
        let counters = Arc::clone(&self.counters);
        let interval = self.config.interval()?;
        let stall_reset = self.config.stall_reset;

        let thread = thread::Builder::new()
            .name("lumen-frame-clock".into())
            .spawn(move || {
                log::debug!("frame clock started ({:?} interval)", interval);
                let mut next = Instant::now() + interval;
                let mut index = 0u64;

                loop {
                    let timeout = next.saturating_duration_since(Instant::now());
                    match stop_rx.recv_timeout(timeout) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    next = next_deadline(next, Instant::now(), interval, stall_reset);

                    if gate
                        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                        .is_err()
                    {
                        counters.suppressed.fetch_add(1, Ordering::Relaxed);
                        continue;
                    }

                    counters.delivered.fetch_add(1, Ordering::Relaxed);
                    on_tick(FrameTick {
                        index,
                        gate: Arc::clone(&gate),
                    });
                    index = index.wrapping_add(1);
                }

                log::debug!("frame clock stopped after {} tick(s)", index);
            })
            .map_err(|source| BridgeError::ThreadSpawn {
                name: "frame clock",
                source,
            })?;

        let thread_id = thread.thread().id();
        self.running = Some(Running {
            stop_tx,
            thread,
            thread_id,
        });
        Ok(())
    }

    /// Stops delivery. Idempotent.
    ///
    /// Blocks until an in-progress tick callback returns. Called from the
    /// clock thread itself (inside a callback) it only signals the stop.
    pub fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        let _ = running.stop_tx.try_send(());
        drop(running.stop_tx);

        if thread::current().id() == running.thread_id {
            return;
        }

        if running.thread.join().is_err() {
            log::error!("frame clock thread panicked");
        }
    }
}

/// Deadline after the one at `next` that has just passed.
///
/// Late ticks catch up on the fixed schedule, except when `now` is more than
/// `stall_reset` past the new deadline: then the schedule restarts from `now`.
fn next_deadline(next: Instant, now: Instant, interval: Duration, stall_reset: Duration) -> Instant {
    let scheduled = next + interval;
    if now.saturating_duration_since(scheduled) > stall_reset {
        log::trace!("frame clock stalled, rebasing schedule");
        return now + interval;
    }
    scheduled
}

impl Drop for FrameClock {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameClock")
            .field("config", &self.config)
            .field("running", &self.is_running())
            .field("delivered", &self.ticks_delivered())
            .field("suppressed", &self.ticks_suppressed())
            .finish()
    }
}
