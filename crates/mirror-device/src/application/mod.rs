//! Application layer for the device side.
//!
//! # What lives here?
//!
//! - **`platform`** – The [`platform::PlatformServices`] trait: everything the
//!   device needs from the OS (display descriptor, rotation watcher, input
//!   injection, power state).  Implementations are in the infrastructure layer.
//!
//! - **`device_state`** – The lock-guarded [`device_state::DeviceState`] that
//!   owns the live `ScreenInfo` and the rotation-listener slot.
//!
//! - **`rotation`** – The [`rotation::RotationReactor`] that recomputes the
//!   geometry on every rotation notification, and the listener trait that
//!   upper layers implement to hear about it.
//!
//! - **`coordinate_mapper`** – Maps client positions into device space, or
//!   reports that the client's view is stale.
//!
//! - **`device`** – The [`device::Device`] facade tying the above together.
//!
//! - **`inject_input`** – Maps incoming control events and injects them.

pub mod coordinate_mapper;
pub mod device;
pub mod device_state;
pub mod inject_input;
pub mod platform;
pub mod rotation;
