//! mirror-device library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does mirror-device do? (for beginners)
//!
//! A screen-mirroring server captures a device's display, scales it down to
//! a video stream, and lets a remote client send touches back.  The display
//! can rotate at any moment, and when it does:
//!
//! 1. The platform reports the new rotation on its own thread.
//! 2. The device derives the new display size from the old one (a quarter
//!    turn swaps width and height; a half turn does not).
//! 3. The video size and capture rectangle are recomputed and committed as a
//!    single snapshot.
//! 4. A listener is told, so the encoder can restart at the new size.
//!
//! Meanwhile, touches from the client are tagged with the video size the
//! client was looking at.  They are scaled into device pixels only if that
//! size still matches; touches aimed at the old orientation are dropped.

/// Application layer: device state, rotation handling, and input mapping.
pub mod application;

/// Infrastructure layer: platform adapters and configuration storage.
pub mod infrastructure;
