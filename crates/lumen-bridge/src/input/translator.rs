use std::collections::HashMap;

use crate::error::{BridgeError, Result};

use super::types::{ContactId, InputEvent, InputKind, RawInput, TouchPhase};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Source {
    Pointer,
    Spatial,
}

/// Converts raw platform samples into normalized [`InputEvent`]s.
///
/// Tracks every contact between its down and up so that each identifier
/// produces exactly one `Down`, any number of `Move`s and one `Up`.
/// Samples that break that sequence are reported as
/// [`BridgeError::TranslationAnomaly`] and produce no event.
#[derive(Debug, Default)]
pub struct EventTranslator {
    contacts: HashMap<ContactId, Source>,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates one raw sample.
    ///
    /// `scale_factor` must be the surface's current device scale; positions
    /// are converted from points to pixels with it. Spatial samples use the
    /// platform's 2D projection of the pose onto the view and carry the pose
    /// itself alongside.
    ///
    /// Returns `Ok(None)` for phases that are not forwarded
    /// (stationary, hover, cancelled).
    pub fn translate(&mut self, raw: &RawInput, scale_factor: f64) -> Result<Option<InputEvent>> {
        let (id, phase, position, timestamp, pose, source) = match raw {
            RawInput::Pointer(p) => (p.id, p.phase, p.position, p.timestamp, None, Source::Pointer),
            RawInput::Spatial(s) => {
                if !s.pose.is_finite() {
                    return Err(anomaly(s.id, "non-finite spatial pose"));
                }
                (s.id, s.phase, s.position, s.timestamp, Some(s.pose), Source::Spatial)
            }
        };

        if !position.is_finite() {
            return Err(anomaly(id, "non-finite position"));
        }
        let position = position.to_pixels(scale_factor);

        let kind = match phase {
            TouchPhase::Began => {
                if self.contacts.contains_key(&id) {
                    return Err(anomaly(id, "down for a contact that is already down"));
                }
                self.contacts.insert(id, source);
                InputKind::Down
            }

            TouchPhase::Moved => {
                self.tracked(id, source)?;
                InputKind::Move
            }

            TouchPhase::Ended => {
                self.tracked(id, source)?;
                self.contacts.remove(&id);
                InputKind::Up
            }

            TouchPhase::Cancelled => {
                if self.contacts.remove(&id).is_some() {
                    log::debug!("contact {id} cancelled");
                }
                return Ok(None);
            }

            TouchPhase::Stationary | TouchPhase::Hover => return Ok(None),
        };

        Ok(Some(InputEvent {
            kind,
            id,
            position,
            timestamp,
            pose,
        }))
    }

    /// Forgets all contacts (surface teardown, mode switch).
    pub fn reset(&mut self) {
        if !self.contacts.is_empty() {
            log::debug!("dropping {} active contact(s)", self.contacts.len());
        }
        self.contacts.clear();
    }

    pub fn active_contacts(&self) -> usize {
        self.contacts.len()
    }

    fn tracked(&self, id: ContactId, source: Source) -> Result<()> {
        let began_as = self
            .contacts
            .get(&id)
            .ok_or_else(|| anomaly(id, "no matching down for this contact"))?;
        if *began_as != source {
            return Err(anomaly(id, "contact switched between pointer and spatial input"));
        }
        Ok(())
    }
}

fn anomaly(id: ContactId, detail: &'static str) -> BridgeError {
    BridgeError::TranslationAnomaly { id, detail }
}
