//! Pentatonic scale table shared by the melodic modes.
//!
//! Five octaves of the major pentatonic degrees (0, 2, 4, 7, 9 semitones),
//! 25 MIDI notes total. Built at compile time; read-only afterwards.

/// Major pentatonic degrees within one octave, in semitones above the root.
const DEGREES: [u8; 5] = [0, 2, 4, 7, 9];

/// Number of notes in the table.
pub const SCALE_LEN: usize = 25;

/// The 25-note pentatonic table, octaves 3 through 7.
pub const PENTATONIC: [u8; SCALE_LEN] = build_scale();

const fn build_scale() -> [u8; SCALE_LEN] {
    let mut notes = [0u8; SCALE_LEN];
    let mut i = 0;
    let mut octave = 3u8;
    while octave < 8 {
        let mut degree = 0;
        while degree < DEGREES.len() {
            notes[i] = octave * 12 + DEGREES[degree];
            i += 1;
            degree += 1;
        }
        octave += 1;
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_25_entries_spanning_octaves_3_to_7() {
        assert_eq!(PENTATONIC.len(), 25);
        assert_eq!(PENTATONIC[0], 36); // octave 3 root
        assert_eq!(PENTATONIC[24], 93); // octave 7, degree 9
    }

    #[test]
    fn strictly_increasing() {
        for pair in PENTATONIC.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn octaves_repeat_the_same_degrees() {
        for (i, note) in PENTATONIC.iter().enumerate() {
            assert_eq!(note % 12, DEGREES[i % 5]);
        }
    }
}
