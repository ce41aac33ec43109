use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct Inner {
    current: bool,
    subscribers: Vec<Sender<bool>>,
}

/// The "immersive active" flag, observable from any thread.
///
/// Subscribers receive the new value on every change. Publishing the
/// current value again is a no-op.
#[derive(Debug, Clone, Default)]
pub struct ModeSignal {
    inner: Arc<Mutex<Inner>>,
}

impl ModeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> bool {
        self.inner.lock().current
    }

    pub fn subscribe(&self) -> Receiver<bool> {
        let (tx, rx) = unbounded();
        self.inner.lock().subscribers.push(tx);
        rx
    }

    /// Returns `true` when the value changed.
    pub fn publish(&self, immersive: bool) -> bool {
        let mut inner = self.inner.lock();
        if inner.current == immersive {
            return false;
        }
        inner.current = immersive;
        inner.subscribers.retain(|tx| tx.send(immersive).is_ok());
        log::debug!("immersive = {immersive} ({} subscriber(s))", inner.subscribers.len());
        true
    }
}
