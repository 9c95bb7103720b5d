//! The controller: mode engine, active-note table, engine handle.
//!
//! Owns the engine for its whole lifetime. Input channels hand it Down/Up
//! transitions; it guarantees duplicate-free note-ons and exactly one
//! note-off per sounding key.

use std::time::{Duration, Instant};

use log::debug;

use crate::engine::{EngineError, SoundEngine, NOTE_OFF, NOTE_ON};
use crate::mode::Mode;
use crate::table::ActiveNoteTable;

pub struct Controller {
    mode: Mode,
    table: ActiveNoteTable,
    engine: Box<dyn SoundEngine>,
    shut_down: bool,
}

impl Controller {
    /// Build a controller and bring the engine up. The initial mode's
    /// waveform is selected as part of construction.
    pub fn new(mut engine: Box<dyn SoundEngine>, initial_mode: Mode) -> Result<Self, EngineError> {
        engine.initialize()?;
        engine.start()?;
        let mut controller = Self {
            mode: initial_mode,
            table: ActiveNoteTable::new(),
            engine,
            shut_down: false,
        };
        controller.announce_mode();
        Ok(controller)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch to `mode` and tell the engine which waveform to render.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.announce_mode();
    }

    /// Advance to the next mode in cycling order.
    pub fn cycle_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    fn announce_mode(&mut self) {
        self.engine.select_waveform(self.mode.waveform());
        println!("[Mode] {}", self.mode.describe());
    }

    /// Handle a Down transition. When the key already sounds this only
    /// refreshes its idle timestamp, so input auto-repeat never re-triggers.
    pub fn note_on(&mut self, key_id: &str, seed: &str) {
        let now = Instant::now();
        if self.table.contains(key_id) {
            self.table.touch(key_id, now);
            return;
        }
        let (note, velocity) = self.mode.derive(seed);
        self.engine.accept_message([NOTE_ON, note, velocity]);
        self.table.insert(key_id, note, now);
        debug!("note on: key={key_id} note={note} vel={velocity}");
    }

    /// Down transition for the terminal channel's fixed 8-key map. Bypasses
    /// mode derivation but shares the bookkeeping and its guarantees.
    pub fn note_on_fixed(&mut self, key_id: &str, note: u8, velocity: u8) {
        let now = Instant::now();
        if self.table.contains(key_id) {
            self.table.touch(key_id, now);
            return;
        }
        self.engine.accept_message([NOTE_ON, note, velocity]);
        self.table.insert(key_id, note, now);
        debug!("note on (fixed): key={key_id} note={note}");
    }

    /// Handle an Up transition. No-op when the key is not sounding.
    pub fn note_off(&mut self, key_id: &str) {
        if let Some(note) = self.table.remove(key_id) {
            self.engine.accept_message([NOTE_OFF, note, 0]);
            debug!("note off: key={key_id} note={note}");
        }
    }

    /// Refresh a held key's idle timestamp (input auto-repeat).
    pub fn touch(&mut self, key_id: &str) {
        self.table.touch(key_id, Instant::now());
    }

    /// Synthesize Up transitions for keys idle longer than `timeout`. Only
    /// the polled channel calls this; channels with native key-up never do.
    pub fn release_expired(&mut self, timeout: Duration) {
        let now = Instant::now();
        for key_id in self.table.scan_expired(now, timeout) {
            self.note_off(&key_id);
        }
    }

    /// Number of keys currently sounding.
    pub fn active_notes(&self) -> usize {
        self.table.len()
    }

    /// Pair off anything still sounding, then stop and release the engine.
    /// Safe to call more than once; later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        for key_id in self.table.keys() {
            self.note_off(&key_id);
        }
        self.engine.stop();
        self.engine.shutdown();
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockEngine;
    use crate::hash::seed_hash;
    use crate::scale::PENTATONIC;

    fn controller_in(mode: Mode) -> (Controller, MockEngine) {
        let engine = MockEngine::default();
        let handle = engine.clone();
        let controller = Controller::new(Box::new(engine), mode).unwrap();
        (controller, handle)
    }

    #[test]
    fn construction_selects_initial_waveform() {
        let (_controller, engine) = controller_in(Mode::Harmonious);
        assert_eq!(engine.recording.borrow().waveforms, vec![3]);
    }

    #[test]
    fn double_down_sends_one_note_on() {
        let (mut controller, engine) = controller_in(Mode::EightBit);

        controller.note_on("30", "a");
        controller.note_on("30", "a");

        let recording = engine.recording.borrow();
        assert_eq!(recording.messages.len(), 1);
        assert_eq!(recording.messages[0][0], NOTE_ON);
        drop(recording);
        assert_eq!(controller.active_notes(), 1);
    }

    #[test]
    fn down_down_up_pairs_one_on_one_off() {
        let (mut controller, engine) = controller_in(Mode::Harmonious);

        controller.note_on("a", "a");
        controller.note_on("a", "a");
        controller.note_off("a");
        controller.note_off("a");

        let expected_note = PENTATONIC[seed_hash("a") as usize % PENTATONIC.len()];
        let recording = engine.recording.borrow();
        assert_eq!(recording.messages.len(), 2);
        assert_eq!(recording.messages[0][0], NOTE_ON);
        assert_eq!(recording.messages[0][1], expected_note);
        assert_eq!(recording.messages[1], [NOTE_OFF, expected_note, 0]);
    }

    #[test]
    fn six_cycles_emit_the_waveform_table_and_round_trip() {
        let (mut controller, engine) = controller_in(Mode::Harmonious);

        for _ in 0..6 {
            controller.cycle_mode();
        }

        assert_eq!(controller.mode(), Mode::Harmonious);
        // Initial selection, then one entry per cycle starting one past it.
        assert_eq!(
            engine.recording.borrow().waveforms,
            vec![3, 4, 2, 0, 1, 5, 3]
        );
    }

    #[test]
    fn fixed_notes_share_the_bookkeeping() {
        let (mut controller, engine) = controller_in(Mode::Massive);

        controller.note_on_fixed("a", 60, 100);
        controller.note_on_fixed("a", 60, 100);
        controller.note_off("a");

        let recording = engine.recording.borrow();
        assert_eq!(
            recording.messages,
            vec![[NOTE_ON, 60, 100], [NOTE_OFF, 60, 0]]
        );
    }

    #[test]
    fn release_expired_pairs_off_idle_keys() {
        let (mut controller, engine) = controller_in(Mode::EightBit);

        controller.note_on("a", "a");
        std::thread::sleep(Duration::from_millis(50));
        controller.note_on("b", "b");

        controller.release_expired(Duration::from_millis(30));
        assert_eq!(controller.active_notes(), 1);

        let recording = engine.recording.borrow();
        assert_eq!(recording.messages.len(), 3); // two ons, one off
        assert_eq!(recording.messages[2][0], NOTE_OFF);
    }

    #[test]
    fn shutdown_releases_everything_once() {
        let (mut controller, engine) = controller_in(Mode::Massive);

        controller.note_on("a", "a");
        controller.shutdown();
        controller.shutdown();

        let recording = engine.recording.borrow();
        assert_eq!(recording.messages.len(), 2); // on + forced off
        assert!(recording.stopped);
        assert!(recording.shut_down);
    }
}
