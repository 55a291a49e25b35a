//! Display geometry domain entity.
//!
//! Everything in this module lives in one of two coordinate spaces:
//!
//! - **device space** – physical display pixels, in the orientation the
//!   display currently has (a 1080×1920 portrait panel turned sideways is a
//!   1920×1080 device).
//! - **video space** – pixels of the outgoing video frame, derived from the
//!   device space by cropping and scaling.
//!
//! [`compute_screen_info`] is the single function that links the two.  It is
//! pure: the same inputs always produce the same [`ScreenInfo`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when deriving a [`ScreenInfo`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// The crop region lies entirely outside the device rectangle.
    #[error("crop region {crop} does not intersect the {device_size} device rectangle")]
    InvalidGeometry { crop: Rect, device_size: Size },

    /// A size cap of 1 cannot produce an even dimension of at least 2.
    #[error("max size {0} is too small: must be 0 (unbounded) or at least 2")]
    MaxSizeTooSmall(u32),

    /// The device reported a zero-sized display.
    #[error("device size {0} has an empty dimension")]
    EmptyDevice(Size),
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the size with width and height swapped.
    pub const fn rotate(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Returns the rectangle anchored at the origin with this size.
    pub const fn to_rect(self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }

    /// Returns the larger of the two dimensions.
    pub fn major(self) -> u32 {
        self.width.max(self.height)
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A pixel position.  Signed because clients may report points outside the
/// frame (e.g. a drag that leaves the video window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.  `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rightmost X coordinate (exclusive).  Widened so it cannot overflow.
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Bottommost Y coordinate (exclusive).
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the overlapping area of `self` and `other`, or `None` when the
    /// two rectangles share no pixel.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= i64::from(left) || bottom <= i64::from(top) {
            return None;
        }

        Some(Rect {
            x: left,
            y: top,
            width: (right - i64::from(left)) as u32,
            height: (bottom - i64::from(top)) as u32,
        })
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// The committed description of the display and the video derived from it.
///
/// `ScreenInfo` is `Copy`: every reader gets its own snapshot and never a
/// reference into shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScreenInfo {
    /// Physical display size in the current orientation.
    pub device_size: Size,
    /// Size of the outgoing video frame.
    pub video_size: Size,
    /// Area of the device captured into the video (the crop, clipped to the
    /// device, or the whole device).
    pub content_rect: Rect,
    /// `true` when the display is in an odd rotation (90° or 270°).
    pub rotated: bool,
}

/// Derives the [`ScreenInfo`] for a device.
///
/// * `device_size` – physical size, already in the current orientation.
/// * `max_size` – cap on the larger video dimension; `0` means unbounded.
/// * `crop` – optional sub-rectangle of the device to capture.
/// * `rotated` – recorded as-is; this function never swaps axes.
///
/// # Rounding
///
/// Each video dimension is the exact scaled value rounded to the nearest even
/// integer, halves rounding up (`405 → 406`, `404.9 → 404`).  The result is
/// then clamped to at most `max_size` rounded down to even, and at least 2.
///
/// # Errors
///
/// * [`GeometryError::InvalidGeometry`] if `crop` misses the device entirely.
/// * [`GeometryError::MaxSizeTooSmall`] if `max_size == 1`.
/// * [`GeometryError::EmptyDevice`] if either device dimension is zero.
pub fn compute_screen_info(
    device_size: Size,
    max_size: u32,
    crop: Option<Rect>,
    rotated: bool,
) -> Result<ScreenInfo, GeometryError> {
    if device_size.width == 0 || device_size.height == 0 {
        return Err(GeometryError::EmptyDevice(device_size));
    }
    if max_size == 1 {
        return Err(GeometryError::MaxSizeTooSmall(max_size));
    }

    let device_rect = device_size.to_rect();
    let content_rect = match crop {
        Some(crop) => crop
            .intersection(&device_rect)
            .ok_or(GeometryError::InvalidGeometry { crop, device_size })?,
        None => device_rect,
    };

    Ok(ScreenInfo {
        device_size,
        video_size: compute_video_size(content_rect.size(), max_size),
        content_rect,
        rotated,
    })
}

/// Scales `content` so its major side fits `max_size` and rounds each side to
/// an even value.  `max_size` is 0 or at least 2.
fn compute_video_size(content: Size, max_size: u32) -> Size {
    let major = u64::from(content.major());
    let (numerator, denominator) = if max_size > 0 && major > u64::from(max_size) {
        (u64::from(max_size), major)
    } else {
        (1, 1)
    };
    let cap = if max_size > 0 {
        u64::from(max_size & !1)
    } else {
        u64::from(u32::MAX & !1)
    };

    // 2 * round_half_up(dim * n / d / 2), kept in integers.
    let scale = |dim: u32| -> u32 {
        let even = 2 * ((u64::from(dim) * numerator + denominator) / (2 * denominator));
        even.clamp(2, cap) as u32
    };

    Size::new(scale(content.width), scale(content.height))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
