//! Cross-platform hook channel (rdev).
//!
//! rdev delivers callbacks on its own thread. The callback does nothing but
//! translate and push into a bounded queue; the main loop below is the only
//! place the controller is touched, so no lock sits around the note table.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, TrySendError};
use log::warn;
use rdev::{listen, Event, EventType, Key};

use crate::controller::Controller;
use crate::input::{InputError, KeyEvent, KeyPhase};

/// Queue depth between the hook thread and the main loop. Typing bursts are
/// tiny; a full queue means the main loop stalled, and the event is dropped
/// rather than blocking the hook callback.
const QUEUE_DEPTH: usize = 256;

enum HookMessage {
    Key(KeyEvent),
    CycleMode,
    Quit,
}

fn translate(event: Event) -> Option<HookMessage> {
    match event.event_type {
        // Tab is the mode switch and never plays; Esc quits on release and
        // stays silent on press.
        EventType::KeyPress(Key::Tab) => Some(HookMessage::CycleMode),
        EventType::KeyPress(Key::Escape) => None,
        EventType::KeyRelease(Key::Tab) => None,
        EventType::KeyRelease(Key::Escape) => Some(HookMessage::Quit),
        EventType::KeyPress(key) => {
            let seed = event.name.filter(|name| !name.is_empty());
            Some(HookMessage::Key(KeyEvent::down(format!("{key:?}"), seed)))
        }
        EventType::KeyRelease(key) => Some(HookMessage::Key(KeyEvent::up(format!("{key:?}")))),
        _ => None,
    }
}

/// Run the hook loop until Esc is released.
pub fn run(controller: &mut Controller) -> Result<(), InputError> {
    let (tx, rx) = bounded::<HookMessage>(QUEUE_DEPTH);

    thread::spawn(move || {
        let result = listen(move |event| {
            if let Some(message) = translate(event) {
                if let Err(TrySendError::Full(_)) = tx.try_send(message) {
                    warn!("input queue full; dropping event");
                }
            }
        });
        if let Err(err) = result {
            warn!("keyboard hook stopped: {err:?}");
        }
    });

    println!("Tab switches modes, Esc quits.");

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(HookMessage::CycleMode) => controller.cycle_mode(),
            Ok(HookMessage::Quit) => return Ok(()),
            Ok(HookMessage::Key(event)) => match event.phase {
                KeyPhase::Down => controller.note_on(&event.key_id, &event.seed),
                KeyPhase::Up => controller.note_off(&event.key_id),
            },
            Err(RecvTimeoutError::Timeout) => {} // nothing pending
            Err(RecvTimeoutError::Disconnected) => {
                // The listener thread only exits when the hook itself died
                // (missing permissions, no display server, ...).
                return Err(InputError::Hook("listener thread exited".to_string()));
            }
        }
    }
}
