//! Input event model.
//!
//! Two families of events exist:
//!
//! - [`ControlEvent`] – what a client sends.  Pointer events carry a
//!   [`Position`] in *video* space, tagged with the video size the client saw.
//! - [`InputEvent`] – what gets injected into the platform.  Pointer events
//!   carry a [`Point`] in *device* space.
//!
//! Turning the first into the second is the job of the device's coordinate
//! mapping; nothing here validates event contents.

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use super::position::Position;

/// Pressure value reported for a fully pressed pointer (fixed point, 16 bits).
pub const PRESSURE_MAX: u16 = 0xFFFF;

/// Keyboard action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Down,
    Up,
}

/// Pointer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchAction {
    Down,
    Up,
    Move,
}

/// How the platform should wait when injecting an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InjectionMode {
    /// Return immediately.
    #[default]
    Async,
    /// Wait until the event has been dispatched and report the result.
    WaitForResult,
    /// Wait until the receiving window has finished handling the event.
    WaitForFinish,
}

/// A key event; key codes are the platform's own and passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub keycode: u32,
    pub repeat: u32,
    pub meta_state: u32,
}

/// A control event received from a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlEvent {
    Key(KeyEvent),
    Touch {
        action: TouchAction,
        pointer_id: u64,
        position: Position,
        pressure: u16,
    },
    Scroll {
        position: Position,
        h_scroll: i32,
        v_scroll: i32,
    },
}

impl ControlEvent {
    /// The client-side position, for pointer events.
    pub fn position(&self) -> Option<Position> {
        match self {
            ControlEvent::Key(_) => None,
            ControlEvent::Touch { position, .. } | ControlEvent::Scroll { position, .. } => {
                Some(*position)
            }
        }
    }

    /// Builds the platform event, placing pointer events at `point`.
    ///
    /// `point` is ignored for key events.
    pub fn to_input_event(&self, point: Point) -> InputEvent {
        match *self {
            ControlEvent::Key(key) => InputEvent::Key(key),
            ControlEvent::Touch {
                action,
                pointer_id,
                pressure,
                ..
            } => InputEvent::Touch {
                action,
                pointer_id,
                point,
                pressure,
            },
            ControlEvent::Scroll {
                h_scroll,
                v_scroll,
                ..
            } => InputEvent::Scroll {
                point,
                h_scroll,
                v_scroll,
            },
        }
    }
}

/// An event ready to be injected into the platform, in device space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Key(KeyEvent),
    Touch {
        action: TouchAction,
        pointer_id: u64,
        point: Point,
        pressure: u16,
    },
    Scroll {
        point: Point,
        h_scroll: i32,
        v_scroll: i32,
    },
}
