//! Write-once successor slot.

use std::sync::OnceLock;

use tracing::warn;

use crate::presentation::Presentation;

/// Holds the presentation that replaced its owner.
///
/// Written once by the event handling of this crate. A second publish is
/// dropped and logged.
#[derive(Default)]
pub struct Successor {
    slot: OnceLock<Box<Presentation>>,
}

impl Successor {
    pub(crate) fn publish(&self, next: Presentation) {
        if let Err(rejected) = self.slot.set(Box::new(next)) {
            warn!(
                "Successor already published, dropping {}",
                rejected.name()
            );
        }
    }

    pub fn get(&self) -> Option<&Presentation> {
        self.slot.get().map(|b| b.as_ref())
    }

    pub fn is_set(&self) -> bool {
        self.slot.get().is_some()
    }

    pub(crate) fn take(&mut self) -> Option<Presentation> {
        self.slot.take().map(|b| *b)
    }
}
