//! Polled terminal channel (crossterm).
//!
//! The terminal only reports key-down, so this channel owns the release
//! simulation: every tick drains whatever is buffered, then any key idle
//! past the release timeout is paired off with a synthesized note-off.
//! This mapping is the channel's own fixed demo map; mode-derived notes
//! are the other channels' business.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;
use log::debug;

use crate::config::Config;
use crate::controller::Controller;
use crate::input::InputError;

/// Home row -> C4 major scale through C5.
const KEY_MAP: [(char, u8); 8] = [
    ('a', 60),
    ('s', 62),
    ('d', 64),
    ('f', 65),
    ('g', 67),
    ('h', 69),
    ('j', 71),
    ('k', 72),
];

const FIXED_VELOCITY: u8 = 100;

fn mapped_note(c: char) -> Option<u8> {
    KEY_MAP.iter().find(|(key, _)| *key == c).map(|(_, note)| *note)
}

/// Puts the terminal back the way it was on every exit path, panics
/// included.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self, InputError> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the polled loop until `q` is pressed.
pub fn run(controller: &mut Controller, config: &Config) -> Result<(), InputError> {
    println!("Keys:  [a] [s] [d] [f] [g] [h] [j] [k]");
    println!("Notes:  C   D   E   F   G   A   B   C'");
    println!("Press 'q' to quit.");

    let guard = RawModeGuard::enable()?;
    let result = poll_loop(controller, config.tick(), config.release_timeout());

    // Engine down before the terminal flips back.
    controller.shutdown();
    drop(guard);
    result
}

fn poll_loop(
    controller: &mut Controller,
    tick: Duration,
    release_timeout: Duration,
) -> Result<(), InputError> {
    loop {
        // Drain everything buffered before the release scan runs.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char(c) => match mapped_note(c) {
                        Some(note) => {
                            controller.note_on_fixed(&c.to_string(), note, FIXED_VELOCITY)
                        }
                        None => debug!("unmapped key: {c:?}"),
                    },
                    _ => {}
                }
            }
        }

        controller.release_expired(release_timeout);
        std::thread::sleep(tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_map_is_the_c_major_scale() {
        let expected = [
            ('a', 60),
            ('s', 62),
            ('d', 64),
            ('f', 65),
            ('g', 67),
            ('h', 69),
            ('j', 71),
            ('k', 72),
        ];
        for (key, note) in expected {
            assert_eq!(mapped_note(key), Some(note));
        }
        assert_eq!(mapped_note('z'), None);
        assert_eq!(mapped_note('q'), None);
    }
}
