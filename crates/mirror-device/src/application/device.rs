//! Device: the surface upper layers talk to.
//!
//! `Device` owns the [`DeviceState`] and a handle to the platform.  Geometry
//! reads and coordinate mapping go through the state; name, power, injection
//! and watcher registration are passed straight to the platform.
//!
//! # Construction order
//!
//! [`Device::open`] first builds and publishes the state, and only then
//! subscribes the [`RotationReactor`].  A notification delivered during
//! subscription therefore always finds a complete state.

use std::sync::Arc;

use mirror_core::{GeometryError, InjectionMode, InputEvent, Point, Position, ScreenInfo};
use thiserror::Error;
use tracing::info;

use super::coordinate_mapper;
use super::device_state::{DeviceState, GeometryOptions};
use super::platform::{PlatformError, PlatformServices, RotationWatcher};
use super::rotation::{RotationListener, RotationReactor};

/// Error type for opening a device.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The geometry options do not fit the display.
    #[error("invalid display geometry: {0}")]
    Geometry(#[from] GeometryError),

    /// The platform could not be queried or subscribed to.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// A device with a display that may rotate at any time.
pub struct Device {
    platform: Arc<dyn PlatformServices>,
    state: Arc<DeviceState>,
}

impl Device {
    /// Queries the display once, builds the state, and starts tracking
    /// rotations.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Platform`] if the display cannot be queried or
    /// the rotation watcher cannot be registered, and
    /// [`DeviceError::Geometry`] if `options` do not fit the display.
    pub fn open(
        platform: Arc<dyn PlatformServices>,
        options: GeometryOptions,
    ) -> Result<Self, DeviceError> {
        let descriptor = platform.display_info()?;
        let state = Arc::new(DeviceState::new(descriptor, options)?);

        let initial = state.screen_info();
        let rotation = descriptor.rotation;
        info!(
            "display {} at {rotation}: video {} from content {}",
            initial.device_size, initial.video_size, initial.content_rect
        );

        Arc::new(RotationReactor::new(Arc::clone(&state))).subscribe(platform.as_ref())?;

        Ok(Self { platform, state })
    }

    /// Returns a snapshot of the current geometry.
    pub fn screen_info(&self) -> ScreenInfo {
        self.state.screen_info()
    }

    /// Maps a client position to device space.
    ///
    /// `None` means the client's view is stale and the event must be dropped.
    pub fn physical_point(&self, position: &Position) -> Option<Point> {
        coordinate_mapper::map_to_device(&self.state, position)
    }

    /// Replaces the rotation listener; `None` removes it.
    pub fn set_rotation_listener(&self, listener: Option<Arc<dyn RotationListener>>) {
        self.state.set_rotation_listener(listener);
    }

    pub fn device_name(&self) -> String {
        self.platform.device_name()
    }

    pub fn is_screen_on(&self) -> bool {
        self.platform.is_screen_on()
    }

    pub fn inject_input_event(&self, event: &InputEvent, mode: InjectionMode) -> bool {
        self.platform.inject_input_event(event, mode)
    }

    /// Registers an additional raw watcher with the platform.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] as reported by the platform.
    pub fn register_rotation_watcher(&self, watcher: RotationWatcher) -> Result<(), PlatformError> {
        self.platform.register_rotation_watcher(watcher)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
