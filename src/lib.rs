//! syntype — keyboard-to-synthesizer controller logic.
//!
//! Normalizes key activity from heterogeneous input channels into a
//! duplicate-free, correctly paired note-on/note-off stream for an external
//! sound engine, with deterministic note selection per mode.
//!
//! # Example
//! ```
//! use syntype::Mode;
//! // Deterministic modes give a seed the same pitch on every call.
//! assert_eq!(Mode::EightBit.derive("a"), Mode::EightBit.derive("a"));
//! ```

pub mod config;
pub mod controller;
pub mod engine;
pub mod hash;
pub mod input;
pub mod mode;
pub mod scale;
pub mod table;

pub use config::Config;
pub use controller::Controller;
pub use engine::{EngineError, MidirEngine, SoundEngine};
pub use input::{InputError, KeyEvent, KeyPhase};
pub use mode::Mode;
pub use scale::PENTATONIC;
