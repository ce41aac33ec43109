use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Sender};
use parking_lot::Mutex;

use crate::core::Renderer;
use crate::error::{BridgeError, Result};
use crate::surface::SurfaceReader;
use crate::time::FrameTick;

use super::stats::Counters;

pub(crate) enum WorkerMsg {
    /// Render one frame for the surface generation captured at tick time.
    Frame { tick: FrameTick, generation: u64 },
    /// Acknowledge once every message queued before this one is handled.
    Flush(Sender<()>),
    /// Exit after the messages queued before this one.
    Shutdown,
}

/// Render-affinity context.
///
/// Frame requests arrive from the clock thread; each is rendered against a
/// fresh snapshot of the surface taken under the renderer lock. Requests
/// whose surface generation is no longer current are discarded, so a frame
/// never targets a surface that has been torn down or replaced.
pub(crate) struct RenderWorker {
    tx: Sender<WorkerMsg>,
    thread: Option<JoinHandle<()>>,
}

impl RenderWorker {
    pub(crate) fn spawn<R: Renderer>(
        renderer: Arc<Mutex<R>>,
        reader: SurfaceReader,
        counters: Arc<Counters>,
    ) -> Result<Self> {
        let (tx, rx) = unbounded::<WorkerMsg>();

        let thread = thread::Builder::new()
            .name("lumen-render".into())
            .spawn(move || {
                log::debug!("render worker started");
                for msg in rx.iter() {
                    match msg {
                        WorkerMsg::Frame { tick, generation } => {
                            {
                                let mut renderer = renderer.lock();
                                match reader.frame_target() {
                                    Some(surface) if surface.generation() == generation => {
                                        renderer.render_frame(&surface);
                                        counters.record_rendered();
                                    }
                                    _ => {
                                        log::trace!("discarding frame {} for stale surface #{generation}", tick.index());
                                        counters.record_discarded();
                                    }
                                }
                            }
                            drop(tick);
                        }
                        WorkerMsg::Flush(ack) => {
                            let _ = ack.send(());
                        }
                        WorkerMsg::Shutdown => break,
                    }
                }
                log::debug!("render worker stopped");
            })
            .map_err(|source| BridgeError::ThreadSpawn {
                name: "render worker",
                source,
            })?;

        Ok(Self {
            tx,
            thread: Some(thread),
        })
    }

    pub(crate) fn sender(&self) -> Sender<WorkerMsg> {
        self.tx.clone()
    }

    /// Waits until queued frames are finished, at most `budget`.
    ///
    /// Returns `false` when the budget elapsed first.
    pub(crate) fn quiesce(&self, budget: Duration) -> bool {
        let (ack_tx, ack_rx) = bounded(1);
        if self.tx.send(WorkerMsg::Flush(ack_tx)).is_err() {
            return true;
        }
        ack_rx.recv_timeout(budget).is_ok()
    }

    /// Stops the worker after it drains its queue.
    pub(crate) fn shutdown(mut self) {
        self.join();
    }

    fn join(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        let _ = self.tx.send(WorkerMsg::Shutdown);
        if thread.join().is_err() {
            log::error!("render worker thread panicked");
        }
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        self.join();
    }
}
