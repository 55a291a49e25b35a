//! Domain entities for mirror-device.
//!
//! Pure types and functions with no OS, thread, or I/O dependencies.  Code
//! in `mirror-device` depends on these, never the other way round, so every
//! rule here can be unit-tested without a device attached.

/// Sizes, rectangles, and the video geometry derivation.
///
/// See [`geometry::compute_screen_info`] for the main entry point.
pub mod geometry;

/// Control events from clients and events injected into the platform.
pub mod input;

/// Client-reported positions in video space.
pub mod position;

/// Absolute display rotation and its parity.
pub mod rotation;
