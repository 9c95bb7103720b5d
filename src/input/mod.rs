//! Input channels.
//!
//! Each channel normalizes its native key activity into the uniform
//! Down/Up `KeyEvent` stream the controller consumes. Capabilities differ:
//! the terminal channel only sees key-down and relies on release
//! simulation; the device and hook channels report both transitions.

#[cfg(target_os = "linux")]
pub mod device;
pub mod hook;
pub mod term;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// Channel-independent key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Identity of the key within a session.
    pub key_id: String,
    pub phase: KeyPhase,
    /// Seed for deterministic note derivation: the printable character when
    /// the channel knows one, otherwise the key identity itself. Printable
    /// identities stay stable across machines and layouts where raw codes
    /// do not.
    pub seed: String,
}

impl KeyEvent {
    pub fn down(key_id: impl Into<String>, seed: Option<String>) -> Self {
        let key_id = key_id.into();
        let seed = seed.unwrap_or_else(|| key_id.clone());
        Self {
            key_id,
            phase: KeyPhase::Down,
            seed,
        }
    }

    pub fn up(key_id: impl Into<String>) -> Self {
        let key_id = key_id.into();
        Self {
            seed: key_id.clone(),
            key_id,
            phase: KeyPhase::Up,
        }
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("no keyboard device found (check /dev/input permissions, or set device_path)")]
    NoKeyboard,
    #[error("failed to open input device {path}: {source}")]
    DeviceOpen {
        path: String,
        source: std::io::Error,
    },
    #[error("keyboard hook failed: {0}")]
    Hook(String),
    #[error("the device channel is only available on Linux")]
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_seed_falls_back_to_key_id() {
        let event = KeyEvent::down("59", None);
        assert_eq!(event.seed, "59");

        let event = KeyEvent::down("30", Some("a".to_string()));
        assert_eq!(event.seed, "a");
        assert_eq!(event.phase, KeyPhase::Down);
    }
}
