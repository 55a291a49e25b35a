//! TOML-based configuration for the device binary.
//!
//! Reads and writes `DeviceConfig` at the platform-appropriate config file:
//! - Windows:  `%APPDATA%\MirrorDevice\config.toml`
//! - Linux:    `~/.config/mirror-device/config.toml`
//! - macOS:    `~/Library/Application Support/MirrorDevice/config.toml`
//!
//! Example:
//!
//! ```toml
//! [video]
//! max_size = 1024
//! crop = { x = 0, y = 960, width = 1080, height = 960 }
//!
//! [logging]
//! log_level = "debug"
//! ```
//!
//! # Serde default values
//!
//! Every field has a `#[serde(default = ...)]`, so an empty file, a file from
//! an older version, or no file at all yields a working configuration.
//!
//! # Overrides
//!
//! Command-line values are collected into [`ConfigOverrides`] and applied on
//! top of the loaded file; a value given on the command line always wins.

use std::path::{Path, PathBuf};

use mirror_core::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::device_state::GeometryOptions;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A crop given as `w:h:x:y` could not be parsed.
    #[error("invalid crop {0:?}: expected width:height:x:y")]
    InvalidCrop(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level device configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceConfig {
    #[serde(default)]
    pub video: VideoConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Video geometry settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoConfig {
    /// Cap on the larger video dimension.  `0` leaves the video unscaled.
    #[serde(default)]
    pub max_size: u32,
    /// Capture rectangle in device coordinates; absent means the full display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<Rect>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset, e.g. `"info"` or
    /// `"mirror_device=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl DeviceConfig {
    /// The geometry options the device is opened with.
    pub fn geometry_options(&self) -> GeometryOptions {
        GeometryOptions {
            max_size: self.video.max_size,
            crop: self.video.crop,
        }
    }
}

// ── Command-line overrides ────────────────────────────────────────────────────

/// Values given on the command line.  `None` keeps the file's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub max_size: Option<u32>,
    pub crop: Option<Rect>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Applies every present override to `config`.
    pub fn apply(self, config: &mut DeviceConfig) {
        if let Some(max_size) = self.max_size {
            config.video.max_size = max_size;
        }
        if let Some(crop) = self.crop {
            config.video.crop = Some(crop);
        }
        if let Some(log_level) = self.log_level {
            config.logging.log_level = log_level;
        }
    }
}

/// Parses a crop written as `width:height:x:y`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidCrop`] unless the text is exactly four
/// colon-separated integers with non-negative width and height.
pub fn parse_crop(text: &str) -> Result<Rect, ConfigError> {
    let invalid = || ConfigError::InvalidCrop(text.to_string());

    let parts: Vec<&str> = text.split(':').map(str::trim).collect();
    let [width, height, x, y] = parts.as_slice() else {
        return Err(invalid());
    };

    let width: u32 = width.parse().map_err(|_| invalid())?;
    let height: u32 = height.parse().map_err(|_| invalid())?;
    let x: i32 = x.parse().map_err(|_| invalid())?;
    let y: i32 = y.parse().map_err(|_| invalid())?;
    Ok(Rect::new(x, y, width, height))
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `DeviceConfig` from the default location.
///
/// # Errors
///
/// See [`load_config_from`]; additionally [`ConfigError::NoPlatformConfigDir`].
pub fn load_config() -> Result<DeviceConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `DeviceConfig` from `path`, returning the defaults if the file does
/// not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<DeviceConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DeviceConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to the default location.
///
/// # Errors
///
/// See [`save_config_to`]; additionally [`ConfigError::NoPlatformConfigDir`].
pub fn save_config(config: &DeviceConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_file_path()?)
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &DeviceConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory, including the application
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("MirrorDevice"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("mirror-device"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("MirrorDevice")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
