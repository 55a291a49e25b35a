//! Implementations of [`PlatformServices`].
//!
//! A real device backend talks to the display, window, input, and power
//! services of its OS.  Only the simulated [`MockPlatform`] ships here; it is
//! always compiled (not guarded by `#[cfg(test)]`) so unit tests, integration
//! tests, and the demo binary can all drive rotations without a device.
//!
//! [`PlatformServices`]: crate::application::platform::PlatformServices

pub mod mock;

pub use mock::MockPlatform;
