//! TOML configuration for the touchpad translator and the replay tool.
//!
//! Read from an explicit path, or from the platform config file:
//! - Windows:  `%APPDATA%\VncTouchpad\config.toml`
//! - Linux:    `~/.config/vnc-touchpad/config.toml`
//! - macOS:    `~/Library/Application Support/VncTouchpad/config.toml`
//!
//! ```toml
//! [input]
//! use_dpad_as_arrows = false
//! rotate_dpad = true
//!
//! [timing]
//! click_pacing_ms = 50
//! long_press_ms = 500
//!
//! [display]
//! remote_width = 1920
//! remote_height = 1080
//! ```
//!
//! Every field has a default, and so does every section, so an empty file is
//! a valid configuration.  Settings are read once when the translator is
//! built; changing the file does not affect a running translator.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::dpad_mouse::DpadSettings;
use crate::infrastructure::gesture_detector::DetectorSettings;

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
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// D-pad behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Forward the d-pad as remote arrow keys instead of moving the mouse.
    #[serde(default)]
    pub use_dpad_as_arrows: bool,
    /// Relabel d-pad arrows by 90° for devices held sideways.
    #[serde(default)]
    pub rotate_dpad: bool,
}

/// Click pacing, mover tick and gesture detector thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    #[serde(default = "default_click_pacing_ms")]
    pub click_pacing_ms: u64,
    #[serde(default = "default_mover_tick_ms")]
    pub mover_tick_ms: u64,
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,
    #[serde(default = "default_double_tap_ms")]
    pub double_tap_ms: u64,
    /// Distance in screen pixels a finger may wander before a tap becomes a scroll.
    #[serde(default = "default_touch_slop")]
    pub touch_slop: f32,
}

/// Remote framebuffer size and local zoom limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_remote_width")]
    pub remote_width: u32,
    #[serde(default = "default_remote_height")]
    pub remote_height: u32,
    /// Initial zoom: screen pixels per remote pixel.
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    #[serde(default = "default_max_scale")]
    pub max_scale: f32,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_click_pacing_ms() -> u64 {
    50
}
fn default_mover_tick_ms() -> u64 {
    50
}
fn default_long_press_ms() -> u64 {
    500
}
fn default_double_tap_ms() -> u64 {
    300
}
fn default_touch_slop() -> f32 {
    8.0
}
fn default_remote_width() -> u32 {
    1024
}
fn default_remote_height() -> u32 {
    768
}
fn default_scale() -> f32 {
    1.0
}
fn default_min_scale() -> f32 {
    0.25
}
fn default_max_scale() -> f32 {
    4.0
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            click_pacing_ms: default_click_pacing_ms(),
            mover_tick_ms: default_mover_tick_ms(),
            long_press_ms: default_long_press_ms(),
            double_tap_ms: default_double_tap_ms(),
            touch_slop: default_touch_slop(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            remote_width: default_remote_width(),
            remote_height: default_remote_height(),
            scale: default_scale(),
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ── Conversions into component settings ───────────────────────────────────────

impl InputConfig {
    pub fn dpad_settings(&self) -> DpadSettings {
        DpadSettings {
            use_dpad_as_arrows: self.use_dpad_as_arrows,
            rotate_dpad: self.rotate_dpad,
        }
    }
}

impl TimingConfig {
    pub fn click_pacing(&self) -> Duration {
        Duration::from_millis(self.click_pacing_ms)
    }

    pub fn mover_tick(&self) -> Duration {
        Duration::from_millis(self.mover_tick_ms)
    }

    pub fn detector_settings(&self) -> DetectorSettings {
        DetectorSettings {
            long_press_ms: self.long_press_ms,
            double_tap_ms: self.double_tap_ms,
            touch_slop: self.touch_slop,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the platform config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads `AppConfig` from `path`, or from the platform config file when
/// `path` is `None`.  A missing file yields `AppConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_file_path()?,
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
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

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("VncTouchpad"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("vnc-touchpad"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("VncTouchpad")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
