//! RotationReactor: keeps [`DeviceState`] in step with display rotations.
//!
//! # Deriving the new size
//!
//! The display is never re-queried inside a notification; a further rotation
//! could already be under way.  The new size comes from the previously
//! committed one: when the rotation parity flips, width and height swap;
//! otherwise the size is unchanged.

use std::sync::Arc;

use mirror_core::{compute_screen_info, GeometryError, Rotation, ScreenInfo, Size};
use tracing::{error, info, warn};

use super::device_state::{DeviceState, GeometryOptions};
use super::platform::{PlatformError, PlatformServices};

/// Observer notified after every committed rotation.
///
/// Called outside the device-state lock, on the platform's notification
/// thread.  Implementations may read the device state or replace the
/// listener.
pub trait RotationListener: Send + Sync {
    fn on_rotation_changed(&self, rotation: Rotation);
}

impl<F> RotationListener for F
where
    F: Fn(Rotation) + Send + Sync,
{
    fn on_rotation_changed(&self, rotation: Rotation) {
        self(rotation)
    }
}

/// Returns the device size after a transition from `old_rotated` to
/// `new_rotated`.
pub fn next_device_size(old_size: Size, old_rotated: bool, new_rotated: bool) -> Size {
    if old_rotated != new_rotated {
        old_size.rotate()
    } else {
        old_size
    }
}

/// Derives the geometry for `device_size`.
///
/// The crop is fixed in device coordinates, so a rotation can move the
/// display out from under it.  In that case the whole display is captured
/// instead of failing the transition.
fn derive_screen_info(
    device_size: Size,
    options: GeometryOptions,
    rotated: bool,
) -> Result<ScreenInfo, GeometryError> {
    let crop = options
        .crop
        .filter(|crop| crop.intersection(&device_size.to_rect()).is_some());
    if crop.is_none() {
        if let Some(dropped) = options.crop {
            warn!("crop {dropped} lies outside the {device_size} display; capturing the full display");
        }
    }
    compute_screen_info(device_size, options.max_size, crop, rotated)
}

/// Handles rotation notifications for one [`DeviceState`].
pub struct RotationReactor {
    state: Arc<DeviceState>,
}

impl RotationReactor {
    pub fn new(state: Arc<DeviceState>) -> Self {
        Self { state }
    }

    /// Registers this reactor with the platform.
    ///
    /// Call once, after the state is fully built: the first notification may
    /// arrive before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the platform rejects the watcher.
    pub fn subscribe(self: Arc<Self>, platform: &dyn PlatformServices) -> Result<(), PlatformError> {
        platform.register_rotation_watcher(Box::new(move |raw| {
            self.on_rotation_changed(Rotation::from_raw(raw));
        }))
    }

    /// Commits the geometry for `rotation` and notifies the listener.
    ///
    /// Returns the committed snapshot, or `None` if the geometry could not be
    /// derived (the previous state is then kept).
    pub fn on_rotation_changed(&self, rotation: Rotation) -> Option<ScreenInfo> {
        let options = self.state.options();
        let new_rotated = rotation.is_rotated();

        let transition = self.state.transition(|current| {
            let next_size = next_device_size(current.device_size, current.rotated, new_rotated);
            derive_screen_info(next_size, options, new_rotated)
        });

        let transition = match transition {
            Ok(transition) => transition,
            Err(e) => {
                error!("rotation to {rotation} not applied: {e}");
                return None;
            }
        };

        info!(
            "rotation {rotation}: device {} -> {}, video {} -> {}",
            transition.previous.device_size,
            transition.current.device_size,
            transition.previous.video_size,
            transition.current.video_size,
        );

        // The state lock is released here.
        if let Some(listener) = transition.listener {
            listener.on_rotation_changed(rotation);
        }

        Some(transition.current)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::platform::DisplayInfo;
    use mirror_core::Rect;
    use std::sync::Mutex;

    fn make_reactor(size: Size, rotation: Rotation, options: GeometryOptions) -> RotationReactor {
        let display = DisplayInfo { size, rotation };
        let state = DeviceState::new(display, options).expect("valid geometry");
        RotationReactor::new(Arc::new(state))
    }

    // ── next_device_size ──────────────────────────────────────────────────────

    #[test]
    fn test_next_device_size_swaps_when_parity_flips() {
        let size = Size::new(1080, 1920);
        assert_eq!(next_device_size(size, false, true), Size::new(1920, 1080));
        assert_eq!(next_device_size(size, true, false), Size::new(1920, 1080));
    }

    #[test]
    fn test_next_device_size_keeps_size_when_parity_unchanged() {
        let size = Size::new(1080, 1920);
        assert_eq!(next_device_size(size, false, false), size);
        assert_eq!(next_device_size(size, true, true), size);
    }

    // ── on_rotation_changed ───────────────────────────────────────────────────

    #[test]
    fn test_rotation_0_to_1_swaps_portrait_1080p() {
        // Arrange
        let reactor = make_reactor(
            Size::new(1080, 1920),
            Rotation::Deg0,
            GeometryOptions {
                max_size: 720,
                crop: None,
            },
        );

        // Act
        let info = reactor.on_rotation_changed(Rotation::Deg90).unwrap();

        // Assert
        assert_eq!(info.device_size, Size::new(1920, 1080));
        assert_eq!(info.video_size, Size::new(720, 406));
        assert!(info.rotated);
        assert_eq!(reactor.state.screen_info(), info);
    }

    #[test]
    fn test_rotation_0_to_2_keeps_size() {
        let reactor = make_reactor(
            Size::new(1080, 1920),
            Rotation::Deg0,
            GeometryOptions::default(),
        );

        let info = reactor.on_rotation_changed(Rotation::Deg180).unwrap();

        assert_eq!(info.device_size, Size::new(1080, 1920));
        assert!(!info.rotated);
    }

    #[test]
    fn test_repeated_same_parity_notifications_do_not_swap() {
        let reactor = make_reactor(
            Size::new(1080, 1920),
            Rotation::Deg0,
            GeometryOptions::default(),
        );

        reactor.on_rotation_changed(Rotation::Deg90);
        let info = reactor.on_rotation_changed(Rotation::Deg270).unwrap();

        assert_eq!(info.device_size, Size::new(1920, 1080));
    }

    #[test]
    fn test_full_turn_returns_to_initial_geometry() {
        let reactor = make_reactor(
            Size::new(1080, 2340),
            Rotation::Deg0,
            GeometryOptions {
                max_size: 1024,
                crop: None,
            },
        );
        let initial = reactor.state.screen_info();

        for rotation in [Rotation::Deg90, Rotation::Deg180, Rotation::Deg270, Rotation::Deg0] {
            reactor.on_rotation_changed(rotation);
        }

        assert_eq!(reactor.state.screen_info(), initial);
    }

    #[test]
    fn test_rotation_keeps_crop_that_still_intersects() {
        // Arrange: bottom half of a portrait display
        let crop = Rect::new(0, 960, 1080, 960);
        let reactor = make_reactor(
            Size::new(1080, 1920),
            Rotation::Deg0,
            GeometryOptions {
                max_size: 0,
                crop: Some(crop),
            },
        );

        // Act
        let info = reactor.on_rotation_changed(Rotation::Deg90).unwrap();

        // Assert: clipped against the 1920x1080 display
        assert_eq!(info.content_rect, Rect::new(0, 960, 1080, 120));
    }

    #[test]
    fn test_rotation_falls_back_to_full_display_when_crop_is_lost() {
        // Arrange
        let crop = Rect::new(0, 1500, 100, 100);
        let reactor = make_reactor(
            Size::new(1080, 1920),
            Rotation::Deg0,
            GeometryOptions {
                max_size: 0,
                crop: Some(crop),
            },
        );

        // Act
        let info = reactor.on_rotation_changed(Rotation::Deg90).unwrap();

        // Assert: the size law still holds and the full display is captured
        assert_eq!(info.device_size, Size::new(1920, 1080));
        assert_eq!(info.content_rect, Rect::new(0, 0, 1920, 1080));

        // Rotating back brings the crop into play again
        let info = reactor.on_rotation_changed(Rotation::Deg0).unwrap();
        assert_eq!(info.content_rect, crop);
    }

    #[test]
    fn test_listener_receives_absolute_rotation() {
        // Arrange
        let reactor = make_reactor(
            Size::new(1080, 1920),
            Rotation::Deg0,
            GeometryOptions::default(),
        );
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        reactor
            .state
            .set_rotation_listener(Some(Arc::new(move |rotation: Rotation| {
                sink.lock().unwrap().push(rotation);
            })));

        // Act
        reactor.on_rotation_changed(Rotation::Deg270);
        reactor.on_rotation_changed(Rotation::Deg180);

        // Assert
        assert_eq!(*seen.lock().unwrap(), vec![Rotation::Deg270, Rotation::Deg180]);
    }

    #[test]
    fn test_listener_can_read_state_without_deadlock() {
        // Arrange
        let reactor = make_reactor(
            Size::new(1080, 1920),
            Rotation::Deg0,
            GeometryOptions::default(),
        );
        let state = Arc::clone(&reactor.state);
        let observed = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&observed);
        reactor
            .state
            .set_rotation_listener(Some(Arc::new(move |_: Rotation| {
                *sink.lock().unwrap() = Some(state.screen_info());
            })));

        // Act
        let committed = reactor.on_rotation_changed(Rotation::Deg90);

        // Assert: the listener saw the committed geometry
        assert_eq!(*observed.lock().unwrap(), committed);
    }
}
