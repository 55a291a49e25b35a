//! Mirror device entry point.
//!
//! Loads the configuration, opens the device on the simulated platform, and
//! keeps it running until Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config() + CLI overrides
//!       └─ --write-config: save_config() and exit
//!  └─ Device::open(MockPlatform, GeometryOptions)
//!  └─ rotation listener  -> logs the new ScreenInfo
//!  └─ rotation task      -> MockPlatform::rotate_to() every --rotate-every-ms
//!       └─ InjectInputUseCase: one touch at the centre of the new video
//!  └─ ctrl_c().await
//! ```
//!
//! # Configuration precedence
//!
//! `RUST_LOG` beats `--log-level`, which beats `[logging] log_level` from the
//! file.  `--max-size` and `--crop` beat the `[video]` section.

use std::path::PathBuf;
use std::sync::{Arc, Weak};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mirror_core::{ControlEvent, Point, Position, Rect, Rotation, TouchAction, PRESSURE_MAX};
use mirror_device::application::device::Device;
use mirror_device::application::inject_input::{InjectInputUseCase, InjectOutcome};
use mirror_device::application::platform::PlatformServices;
use mirror_device::infrastructure::platform::MockPlatform;
use mirror_device::infrastructure::storage::config::{
    self, ConfigError, ConfigOverrides, DeviceConfig,
};

/// Command-line arguments for the device binary.
#[derive(Debug, Parser)]
#[command(
    name = "mirror-device",
    about = "Device-side display geometry and input mapping for screen mirroring",
    version
)]
struct Cli {
    /// Path to the TOML config file.  Defaults to the platform config directory.
    #[arg(long, env = "MIRROR_CONFIG")]
    config: Option<PathBuf>,

    /// Cap on the larger video dimension (0 = unbounded).
    #[arg(long, env = "MIRROR_MAX_SIZE")]
    max_size: Option<u32>,

    /// Capture rectangle as width:height:x:y in device pixels.
    #[arg(long, env = "MIRROR_CROP", value_parser = parse_crop_arg)]
    crop: Option<Rect>,

    /// `tracing` filter used when RUST_LOG is unset.
    #[arg(long, env = "MIRROR_LOG_LEVEL")]
    log_level: Option<String>,

    /// Rotate the simulated display by a quarter turn at this interval.
    #[arg(long, env = "MIRROR_ROTATE_EVERY_MS")]
    rotate_every_ms: Option<u64>,

    /// Write the effective configuration (file plus overrides) and exit.
    #[arg(long)]
    write_config: bool,
}

fn parse_crop_arg(text: &str) -> Result<Rect, String> {
    config::parse_crop(text).map_err(|e| e.to_string())
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            max_size: self.max_size,
            crop: self.crop,
            log_level: self.log_level.clone(),
        }
    }
}

/// Loads the file config.  An undeterminable default location is not fatal.
fn load_file_config(path: Option<&PathBuf>) -> anyhow::Result<DeviceConfig> {
    match path {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => match config::load_config() {
            Ok(cfg) => Ok(cfg),
            Err(ConfigError::NoPlatformConfigDir) => Ok(DeviceConfig::default()),
            Err(e) => Err(e).context("loading config"),
        },
    }
}

/// Persists `cfg` to `path`, or to the platform config file.
fn write_file_config(cfg: &DeviceConfig, path: Option<&PathBuf>) -> anyhow::Result<PathBuf> {
    match path {
        Some(path) => {
            config::save_config_to(cfg, path)
                .with_context(|| format!("writing config to {}", path.display()))?;
            Ok(path.clone())
        }
        None => {
            config::save_config(cfg).context("writing config")?;
            Ok(config::config_file_path()?)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = load_file_config(cli.config.as_ref())?;
    cli.overrides().apply(&mut cfg);

    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.log_level)),
        )
        .init();

    if cli.write_config {
        let path = write_file_config(&cfg, cli.config.as_ref())?;
        info!("configuration written to {}", path.display());
        return Ok(());
    }

    info!("mirror device starting");

    // ── Device ────────────────────────────────────────────────────────────────
    // The simulated platform stands in for the OS services.
    let platform = Arc::new(MockPlatform::portrait_1080p());
    let device = Arc::new(
        Device::open(
            Arc::clone(&platform) as Arc<dyn PlatformServices>,
            cfg.geometry_options(),
        )
        .context("opening device")?,
    );
    info!(
        "device {:?} ready, screen {}",
        device.device_name(),
        if device.is_screen_on() { "on" } else { "off" }
    );

    // The listener holds a weak handle so the device can be dropped.
    let weak: Weak<Device> = Arc::downgrade(&device);
    device.set_rotation_listener(Some(Arc::new(move |rotation: Rotation| {
        if let Some(device) = weak.upgrade() {
            let info = device.screen_info();
            info!(
                "now at {rotation}: device {}, video {}",
                info.device_size, info.video_size
            );
        }
    })));

    // ── Rotation task ─────────────────────────────────────────────────────────
    if let Some(period_ms) = cli.rotate_every_ms.filter(|ms| *ms > 0) {
        let platform = Arc::clone(&platform);
        let device = Arc::clone(&device);
        let inject = InjectInputUseCase::new(Arc::clone(&device));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(period_ms));
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let next = (i32::from(platform.rotation().index()) + 1) & 3;
                platform.rotate_to(next);

                let video = device.screen_info().video_size;
                let centre = Point::new((video.width / 2) as i32, (video.height / 2) as i32);
                let touch = ControlEvent::Touch {
                    action: TouchAction::Down,
                    pointer_id: 0,
                    position: Position::new(centre, video),
                    pressure: PRESSURE_MAX,
                };
                match inject.handle(&touch) {
                    InjectOutcome::Injected => {}
                    InjectOutcome::Dropped => warn!("centre touch dropped after rotation"),
                    InjectOutcome::Rejected => error!("centre touch rejected by platform"),
                }
            }
        });
    }

    // ── Shutdown ──────────────────────────────────────────────────────────────
    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    info!(
        "shutdown signal received; {} events injected",
        platform.injected_count()
    );

    Ok(())
}
