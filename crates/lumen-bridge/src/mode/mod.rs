//! Presentation-mode transitions and the immersive flag.

mod controller;
mod signal;

pub use controller::{HostSignal, ModeController, ModeRequest, ModeRequester, Outcome, RequestKind};
pub use signal::ModeSignal;
