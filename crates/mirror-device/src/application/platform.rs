//! The platform service boundary.
//!
//! Everything the device needs from the operating system goes through
//! [`PlatformServices`]: the initial display descriptor, rotation
//! notifications, input injection, and power state.  Implementations live in
//! the infrastructure layer; the application layer only sees this trait.

use mirror_core::{InjectionMode, InputEvent, Rotation, Size};
use thiserror::Error;

/// Error type for platform service calls.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The system service could not be reached.
    #[error("platform service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The service was reached but the call failed.
    #[error("platform call failed: {0}")]
    CallFailed(String),
}

/// Display descriptor as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Size in the display's *current* orientation.
    pub size: Size,
    pub rotation: Rotation,
}

/// Callback invoked with the raw rotation value on every rotation change.
///
/// Called on a platform-owned thread, possibly concurrently with anything
/// else in the process.
pub type RotationWatcher = Box<dyn Fn(i32) + Send + Sync>;

/// Platform-agnostic access to the device's system services.
pub trait PlatformServices: Send + Sync {
    /// Queries the current display descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the display service cannot be queried.
    fn display_info(&self) -> Result<DisplayInfo, PlatformError>;

    /// Registers a watcher for the lifetime of the process.  There is no
    /// unregister.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the window service rejects the watcher.
    fn register_rotation_watcher(&self, watcher: RotationWatcher) -> Result<(), PlatformError>;

    /// Injects an input event.  Returns whatever the platform reports.
    fn inject_input_event(&self, event: &InputEvent, mode: InjectionMode) -> bool;

    fn is_screen_on(&self) -> bool;

    /// Human-readable device model name.
    fn device_name(&self) -> String;
}
