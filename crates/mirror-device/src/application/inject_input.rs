//! InjectInputUseCase: turns client control events into device input events.
//!
//! Pointer events carry the video size the client was looking at.  Each one
//! is mapped against the *current* geometry; if the client's view is stale
//! (a rotation happened since its last frame) the event is dropped.  Key
//! events have no position and are always forwarded.

use std::sync::Arc;

use mirror_core::{ControlEvent, InjectionMode, Point};
use tracing::{debug, warn};

use super::device::Device;

/// What happened to a handled control event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectOutcome {
    /// The platform accepted the event.
    Injected,
    /// The event referred to a stale video size and was not sent.
    Dropped,
    /// The platform refused the event.
    Rejected,
}

/// The Inject Input use case.
pub struct InjectInputUseCase {
    device: Arc<Device>,
    mode: InjectionMode,
}

impl InjectInputUseCase {
    /// Creates a use case that injects with [`InjectionMode::Async`].
    pub fn new(device: Arc<Device>) -> Self {
        Self::with_mode(device, InjectionMode::default())
    }

    pub fn with_mode(device: Arc<Device>, mode: InjectionMode) -> Self {
        Self { device, mode }
    }

    /// Maps and injects one control event.
    pub fn handle(&self, event: &ControlEvent) -> InjectOutcome {
        let point = match event.position() {
            Some(position) => match self.device.physical_point(&position) {
                Some(point) => point,
                None => {
                    debug!("control event dropped: {event:?}");
                    return InjectOutcome::Dropped;
                }
            },
            None => Point::default(),
        };

        let input = event.to_input_event(point);
        if self.device.inject_input_event(&input, self.mode) {
            InjectOutcome::Injected
        } else {
            warn!("platform rejected {input:?} ({:?})", self.mode);
            InjectOutcome::Rejected
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
