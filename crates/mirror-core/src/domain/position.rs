//! Client-reported input positions.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Size};

/// Where a client saw an input event happen.
///
/// `point` is in video space, and `screen_size` is the video size the client
/// was displaying at the time.  The device compares `screen_size` with its
/// current video size before trusting `point`: after a rotation the two
/// disagree until the client catches up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub point: Point,
    pub screen_size: Size,
}

impl Position {
    pub const fn new(point: Point, screen_size: Size) -> Self {
        Self { point, screen_size }
    }
}
