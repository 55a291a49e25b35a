//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration from the
//! platform-appropriate directory (or an explicit path), writes it back, and
//! layers command-line overrides on top.  A missing file is not an error: the
//! device then runs on defaults.

pub mod config;
