//! Generation modes.
//!
//! Each mode pairs a waveform the engine should render with a policy for
//! turning a key's seed string into a `(note, velocity)` pair. Deterministic
//! modes give a key the same pitch every press; Mechanical randomizes on
//! purpose to sound like key clicks rather than melody.

use rand::Rng;

use crate::hash::seed_hash;
use crate::scale::PENTATONIC;

/// Number of modes; indices wrap modulo this.
pub const MODE_COUNT: u8 = 6;

/// Generation mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Harmonious,
    Mechanical,
    EightBit,
    Crystal,
    SciFi,
    Massive,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Harmonious
    }
}

impl Mode {
    /// Mode at `index`, wrapping modulo the mode count.
    pub fn from_index(index: u8) -> Self {
        match index % MODE_COUNT {
            0 => Mode::Harmonious,
            1 => Mode::Mechanical,
            2 => Mode::EightBit,
            3 => Mode::Crystal,
            4 => Mode::SciFi,
            _ => Mode::Massive,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Mode::Harmonious => 0,
            Mode::Mechanical => 1,
            Mode::EightBit => 2,
            Mode::Crystal => 3,
            Mode::SciFi => 4,
            Mode::Massive => 5,
        }
    }

    /// Next mode in cycling order.
    pub fn next(self) -> Self {
        Mode::from_index(self.index() + 1)
    }

    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "harmonious" | "zen" => Mode::Harmonious,
            "mechanical" | "typewriter" => Mode::Mechanical,
            "8bit" | "eightbit" | "arcade" => Mode::EightBit,
            "crystal" | "glass" => Mode::Crystal,
            "scifi" | "sci-fi" => Mode::SciFi,
            "massive" => Mode::Massive,
            _ => Mode::Harmonious, // Default fallback
        }
    }

    /// Oscillator timbre id the engine renders for this mode.
    pub fn waveform(self) -> u8 {
        match self {
            Mode::Harmonious => 3, // triangle
            Mode::Mechanical => 4, // noise
            Mode::EightBit => 2,   // square
            Mode::Crystal => 0,    // sine
            Mode::SciFi => 1,      // saw
            Mode::Massive => 5,    // supersaw
        }
    }

    /// One-line description shown when the mode is selected.
    pub fn describe(self) -> &'static str {
        match self {
            Mode::Harmonious => "1. Harmonious (Zen) : Turns text into music (Pentatonic, Triangle)",
            Mode::Mechanical => "2. Mechanical       : Satisfying clicky typewriter sounds (Noise)",
            Mode::EightBit => "3. 8-Bit Arcade     : Retro handheld vibes (Square, Chromatic)",
            Mode::Crystal => "4. Crystal (Glass)  : High-pitched ambient (Sine, High Octave)",
            Mode::SciFi => "5. Sci-Fi           : Low Dystopian Bass (Saw, Low Octave)",
            Mode::Massive => "6. Massive          : SuperSaw Texture Wall",
        }
    }

    /// Derive `(note, velocity)` for a seed under this mode.
    pub fn derive(self, seed: &str) -> (u8, u8) {
        let h = seed_hash(seed) as usize;
        match self {
            Mode::Harmonious => (
                PENTATONIC[h % PENTATONIC.len()],
                rand::thread_rng().gen_range(80..=100),
            ),
            Mode::Mechanical => (rand::thread_rng().gen_range(40..=90), 127),
            Mode::EightBit => ((h % 36) as u8 + 48, 110),
            Mode::Crystal => ((PENTATONIC[h % PENTATONIC.len()] + 24).min(108), 90),
            Mode::SciFi => ((h % 24) as u8 + 24, 120),
            Mode::Massive => (PENTATONIC[h % PENTATONIC.len()], 100),
        }
    }
}
