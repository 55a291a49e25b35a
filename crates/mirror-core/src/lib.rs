//! # mirror-core
//!
//! Shared domain library for mirror-device: display geometry, rotation, and
//! the input-event model.
//!
//! It has zero dependencies on OS APIs, threads, or sockets.
//!
//! # Overview
//!
//! A device streams its display as video.  The video is not the display: it
//! may be cropped to a sub-rectangle and scaled down so its larger side fits a
//! size cap.  This crate defines:
//!
//! - **`domain::geometry`** – `Size`, `Point`, `Rect`, the committed
//!   `ScreenInfo` record, and `compute_screen_info`, the pure function that
//!   derives video geometry from device geometry.
//!
//! - **`domain::rotation`** – the absolute `Rotation` reported by the
//!   platform and its parity (whether width and height are swapped).
//!
//! - **`domain::position`** / **`domain::input`** – what clients report
//!   (points in video space) and what gets injected (points in device space).

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `mirror_core::ScreenInfo` instead of `mirror_core::domain::geometry::ScreenInfo`.
pub use domain::geometry::{compute_screen_info, GeometryError, Point, Rect, ScreenInfo, Size};
pub use domain::input::{
    ControlEvent, InjectionMode, InputEvent, KeyAction, KeyEvent, TouchAction, PRESSURE_MAX,
};
pub use domain::position::Position;
pub use domain::rotation::Rotation;
