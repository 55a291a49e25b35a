//! Infrastructure layer for the device side.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `mirror_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`platform`** – Implementations of `PlatformServices`.  A
//!   `MockPlatform` is always compiled so tests and the demo binary can run
//!   without a real device.
//!
//! - **`storage`** – TOML configuration: load, save, and command-line
//!   overrides.

pub mod platform;
pub mod storage;
