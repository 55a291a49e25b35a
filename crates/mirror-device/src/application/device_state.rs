//! DeviceState: the single lock-guarded record of the live display geometry.
//!
//! # Locking discipline
//!
//! One `std::sync::Mutex` guards the current [`ScreenInfo`] together with the
//! rotation-listener slot.  Every access takes the lock for the shortest
//! possible section:
//!
//! - reads copy the `ScreenInfo` out and release the lock before returning;
//! - the single write path ([`DeviceState::transition`]) runs the caller's
//!   derivation and commits the result under the lock, then hands the
//!   listener back so the caller can notify it *after* the lock is released.
//!
//! Nothing ever calls a listener or the platform while holding the lock, so a
//! listener is free to read the state or replace itself.
//!
//! A poisoned lock is recovered.  The guarded record is only ever replaced by
//! a single assignment.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mirror_core::{compute_screen_info, GeometryError, Rect, ScreenInfo};

use super::platform::DisplayInfo;
use super::rotation::RotationListener;

/// Video geometry constraints, fixed for the lifetime of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometryOptions {
    /// Cap on the larger video dimension; `0` means unbounded.
    pub max_size: u32,
    /// Optional capture rectangle in device coordinates.
    pub crop: Option<Rect>,
}

/// The outcome of a committed transition.
pub struct Transition {
    pub previous: ScreenInfo,
    pub current: ScreenInfo,
    /// The listener registered at commit time, to be notified by the caller.
    pub listener: Option<Arc<dyn RotationListener>>,
}

struct StateInner {
    screen_info: ScreenInfo,
    listener: Option<Arc<dyn RotationListener>>,
}

/// Owner of the live [`ScreenInfo`].
///
/// The rotation parity is stored as `ScreenInfo::rotated`, so the committed
/// record and the flag can never disagree.
pub struct DeviceState {
    options: GeometryOptions,
    inner: Mutex<StateInner>,
}

impl DeviceState {
    /// Builds the initial state from the platform's display descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the options cannot be applied to the
    /// display, e.g. a crop outside the display.
    pub fn new(display: DisplayInfo, options: GeometryOptions) -> Result<Self, GeometryError> {
        let screen_info = compute_screen_info(
            display.size,
            options.max_size,
            options.crop,
            display.rotation.is_rotated(),
        )?;

        Ok(Self {
            options,
            inner: Mutex::new(StateInner {
                screen_info,
                listener: None,
            }),
        })
    }

    pub fn options(&self) -> GeometryOptions {
        self.options
    }

    /// Returns a snapshot of the current geometry.
    pub fn screen_info(&self) -> ScreenInfo {
        self.lock().screen_info
    }

    /// Returns the last committed rotation parity.
    pub fn is_rotated(&self) -> bool {
        self.lock().screen_info.rotated
    }

    /// Replaces the rotation listener.  `None` clears the slot.
    ///
    /// A listener that is replaced while a notification is in flight may
    /// still receive that one notification.
    pub fn set_rotation_listener(&self, listener: Option<Arc<dyn RotationListener>>) {
        self.lock().listener = listener;
    }

    /// Atomically replaces the current geometry with `derive(&current)`.
    ///
    /// `derive` runs under the lock and must not call back into this state.
    /// When it fails nothing is committed.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `derive`.
    pub fn transition<F, E>(&self, derive: F) -> Result<Transition, E>
    where
        F: FnOnce(&ScreenInfo) -> Result<ScreenInfo, E>,
    {
        let mut inner = self.lock();
        let previous = inner.screen_info;
        let current = derive(&previous)?;
        inner.screen_info = current;

        Ok(Transition {
            previous,
            current,
            listener: inner.listener.clone(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, StateInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
