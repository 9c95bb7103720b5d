//! Global device channel (evdev, Linux only).
//!
//! Reads key transitions straight from /dev/input, so it hears every key on
//! the system regardless of focus and gets native key-up. Needs read access
//! to the device node (typically the `input` group, or root).

use evdev::{Device, InputEventKind, Key};
use log::{debug, warn};

use crate::config::Config;
use crate::controller::Controller;
use crate::input::InputError;

const UP: i32 = 0;
const DOWN: i32 = 1;
const REPEAT: i32 = 2;

/// Pick the input device: an explicit `device_path` from config wins,
/// otherwise the first device calling itself a keyboard.
fn open_keyboard(config: &Config) -> Result<Device, InputError> {
    if let Some(path) = &config.device_path {
        return Device::open(path).map_err(|source| InputError::DeviceOpen {
            path: path.clone(),
            source,
        });
    }

    for (path, device) in evdev::enumerate() {
        let is_keyboard = device
            .name()
            .map(|name| name.to_lowercase().contains("keyboard"))
            .unwrap_or(false);
        if is_keyboard {
            debug!("using input device {}", path.display());
            return Ok(device);
        }
    }

    // Nothing matched; list what exists so the operator can pin a path.
    let mut any = false;
    for (path, device) in evdev::enumerate() {
        println!("  {} - {}", path.display(), device.name().unwrap_or("?"));
        any = true;
    }
    if any {
        println!("None of these call themselves a keyboard; set `device_path` in syntype.toml.");
    }
    Err(InputError::NoKeyboard)
}

/// Run the blocking read loop until Esc is pressed on the device.
pub fn run(controller: &mut Controller, config: &Config) -> Result<(), InputError> {
    let mut device = open_keyboard(config)?;
    println!("Listening on: {}", device.name().unwrap_or("<unnamed>"));
    println!("Tab switches modes, Esc quits.");

    let mut alt_held = false;

    loop {
        let events = device.fetch_events()?;
        for event in events {
            let InputEventKind::Key(key) = event.kind() else {
                continue;
            };
            let value = event.value();

            if key == Key::KEY_LEFTALT || key == Key::KEY_RIGHTALT {
                alt_held = value != UP;
            }

            // Plain Tab is the mode switch; Alt+Tab is the window switcher,
            // so it falls through and plays like any other key.
            if key == Key::KEY_TAB && value == DOWN && !alt_held {
                controller.cycle_mode();
                continue;
            }

            if key == Key::KEY_ESC && value == DOWN {
                return Ok(());
            }

            let key_id = key.code().to_string();
            match value {
                DOWN => controller.note_on(&key_id, &format!("{key:?}")),
                UP => controller.note_off(&key_id),
                REPEAT => controller.touch(&key_id),
                other => warn!("unexpected key state {other} for {key:?}"),
            }
        }
    }
}
