//! Absolute display rotation.

use std::fmt;

/// Rotation of the display relative to its natural orientation.
///
/// The platform reports rotations as small integers (0..=3, quarter turns
/// counter-clockwise).  Only the *parity* matters for geometry: odd rotations
/// swap the display's width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// Natural orientation.
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Converts a raw platform value, keeping only its two low bits.
    pub fn from_raw(raw: i32) -> Self {
        match raw & 3 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// Quarter-turn index, 0..=3.
    pub fn index(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// `true` for 90° and 270°, where the display's axes are swapped.
    pub fn is_rotated(self) -> bool {
        self.index() & 1 != 0
    }

    pub fn degrees(self) -> u16 {
        u16::from(self.index()) * 90
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
