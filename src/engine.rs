//! Sound-engine boundary.
//!
//! The synthesizer itself is an external collaborator; the controller only
//! ever talks to it through `SoundEngine`. The real adapter forwards 3-byte
//! messages over a MIDI output port; tests use a recording mock.

use log::{info, warn};
use midir::{MidiOutput, MidiOutputConnection};
use thiserror::Error;

/// MIDI note-on status byte.
pub const NOTE_ON: u8 = 0x90;
/// MIDI note-off status byte.
pub const NOTE_OFF: u8 = 0x80;
/// MIDI program-change status byte; carries the waveform selection.
pub const PROGRAM_CHANGE: u8 = 0xC0;
/// MIDI control-change status byte.
const CONTROL_CHANGE: u8 = 0xB0;
/// CC number for "all notes off".
const ALL_NOTES_OFF: u8 = 123;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to open MIDI output: {0}")]
    Init(String),
    #[error("no MIDI output ports available")]
    NoPorts,
    #[error("no MIDI output port matching '{0}'")]
    NoMatchingPort(String),
    #[error("failed to connect to MIDI output port: {0}")]
    Connect(String),
}

/// Contract the controller drives the external engine through.
pub trait SoundEngine {
    /// Acquire the underlying output resource. Must succeed before any
    /// message is sent; failure is fatal for the session.
    fn initialize(&mut self) -> Result<(), EngineError>;
    /// Begin rendering.
    fn start(&mut self) -> Result<(), EngineError>;
    /// Forward one 3-byte message. Send failures on a live connection are
    /// recoverable: logged, never propagated.
    fn accept_message(&mut self, message: [u8; 3]);
    /// Select the oscillator timbre (0..=5).
    fn select_waveform(&mut self, waveform: u8);
    /// Stop rendering. Idempotent.
    fn stop(&mut self);
    /// Release the underlying resource. Idempotent.
    fn shutdown(&mut self);
}

/// `SoundEngine` over a midir output connection.
pub struct MidirEngine {
    port_filter: Option<String>,
    conn: Option<MidiOutputConnection>,
}

impl MidirEngine {
    /// `port_filter` is a case-insensitive substring of the port to use;
    /// with `None` the first available port wins.
    pub fn new(port_filter: Option<String>) -> Self {
        Self {
            port_filter,
            conn: None,
        }
    }

    fn send(&mut self, bytes: &[u8]) {
        if let Some(conn) = self.conn.as_mut() {
            if let Err(err) = conn.send(bytes) {
                warn!("MIDI send failed: {err}");
            }
        }
    }
}

impl SoundEngine for MidirEngine {
    fn initialize(&mut self) -> Result<(), EngineError> {
        let output = MidiOutput::new("syntype").map_err(|e| EngineError::Init(e.to_string()))?;
        let ports = output.ports();
        if ports.is_empty() {
            return Err(EngineError::NoPorts);
        }

        let port = match &self.port_filter {
            Some(filter) => {
                let needle = filter.to_lowercase();
                ports
                    .iter()
                    .find(|p| {
                        output
                            .port_name(p)
                            .map(|name| name.to_lowercase().contains(&needle))
                            .unwrap_or(false)
                    })
                    .ok_or_else(|| EngineError::NoMatchingPort(filter.clone()))?
            }
            None => &ports[0],
        };

        let name = output
            .port_name(port)
            .unwrap_or_else(|_| "<unknown>".to_string());
        let conn = output
            .connect(port, "syntype-out")
            .map_err(|e| EngineError::Connect(e.to_string()))?;
        info!("MIDI output connected: {name}");
        println!("MIDI output: {name}");
        self.conn = Some(conn);
        Ok(())
    }

    fn start(&mut self) -> Result<(), EngineError> {
        // The stream is live as soon as the connection is open.
        Ok(())
    }

    fn accept_message(&mut self, message: [u8; 3]) {
        self.send(&message);
    }

    fn select_waveform(&mut self, waveform: u8) {
        self.send(&[PROGRAM_CHANGE, waveform & 0x7f]);
    }

    fn stop(&mut self) {
        // Silence anything still ringing before the port goes away.
        self.send(&[CONTROL_CHANGE, ALL_NOTES_OFF, 0]);
    }

    fn shutdown(&mut self) {
        if let Some(conn) = self.conn.take() {
            let _ = conn.close();
        }
    }
}
