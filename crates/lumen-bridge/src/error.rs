use thiserror::Error;

use crate::surface::PresentationMode;

/// Errors surfaced by the bridge and its components.
///
/// `AlreadyInitialized`, `NotInitialized`, `AlreadyRunning` and
/// `InvalidTransition` are lifecycle misuse and are returned to the caller
/// as-is. `SurfaceUnavailable` is recoverable: the bridge keeps its state and
/// waits for a corrective resize or re-initialization.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("surface is already initialized")]
    AlreadyInitialized,

    #[error("surface is not initialized")]
    NotInitialized,

    #[error("frame clock is already running")]
    AlreadyRunning,

    #[error("surface unavailable: {reason}")]
    SurfaceUnavailable { reason: String },

    #[error("input anomaly for contact {id}: {detail}")]
    TranslationAnomaly { id: u64, detail: &'static str },

    #[error("cannot switch to {requested:?} while in {from:?}")]
    InvalidTransition {
        from: PresentationMode,
        requested: PresentationMode,
    },

    #[error("failed to spawn {name} thread: {source}")]
    ThreadSpawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl BridgeError {
    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        Self::SurfaceUnavailable {
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors the bridge recovers from without caller action
    /// beyond a corrective resize or re-initialization.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SurfaceUnavailable { .. } | Self::TranslationAnomaly { .. }
        )
    }
}

pub type Result<T, E = BridgeError> = std::result::Result<T, E>;
