//! Configuration loader for syntype.
//!
//! * Looks for `syntype.toml` in the cwd unless overridden by `--config`.
//! * Provides defaults so the file is optional.
//!
//! Extend this struct whenever you add new tunables.

use serde::Deserialize;
use std::fs;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Polling interval of the terminal channel, in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Idle time after which a held key counts as released, in milliseconds.
    /// Must exceed the OS key-repeat interval (typically <= 500 ms) or held
    /// keys stutter.
    #[serde(default = "default_release_timeout_ms")]
    pub release_timeout_ms: u64,
    /// Initial mode name (optional; see `Mode::from_string`).
    #[serde(default)]
    pub mode: Option<String>,
    /// Case-insensitive substring of the MIDI output port to connect to.
    /// First available port when unset.
    #[serde(default)]
    pub midi_port: Option<String>,
    /// Input device node for the device channel (e.g. `/dev/input/event3`).
    /// Auto-detected when unset.
    #[serde(default)]
    pub device_path: Option<String>,
}

fn default_tick_ms() -> u64 {
    10
}

fn default_release_timeout_ms() -> u64 {
    600
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            release_timeout_ms: default_release_timeout_ms(),
            mode: None,
            midi_port: None,
            device_path: None,
        }
    }
}

impl Config {
    /// Load from a TOML file; fall back to defaults on any error.
    pub fn load(path: Option<&str>) -> Self {
        let p = path.unwrap_or("syntype.toml");
        match fs::read_to_string(p) {
            Ok(text) => toml::from_str(&text).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn release_timeout(&self) -> Duration {
        Duration::from_millis(self.release_timeout_ms)
    }
}
