/*
MIDI Note Helpers
=================

Middle C (C4) = MIDI note 60, A4 = MIDI note 69 = 440 Hz.

The MIDI formula: note_number = 12 * (octave + 1) + semitone
Where semitone: C=0, C#=1, D=2, D#=3, E=4, F=5, F#=6, G=7, G#=8, A=9, A#=10, B=11

Each quadrant of the canvas plays one of the scales below. They span roughly
one octave each, starting on the tonic of the named key.
*/

/// Top-left quadrant: C4 to C5
pub const C_MAJOR: [u8; 8] = [60, 62, 64, 65, 67, 69, 71, 72];
/// Top-right quadrant: A4 to A5
pub const A_MAJOR: [u8; 8] = [69, 71, 72, 74, 76, 77, 79, 81];
/// Bottom-left quadrant: G4 to G5
pub const G_MAJOR: [u8; 8] = [67, 69, 71, 72, 74, 76, 77, 79];
/// Bottom-right quadrant: F4 to F5
pub const F_MAJOR: [u8; 8] = [65, 67, 69, 71, 73, 74, 76, 77];

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// Scientific pitch name for a MIDI note, e.g. `60 -> "C4"`, `66 -> "F#4"`.
pub fn note_name(note: u8) -> String {
    let octave = (note / 12) as i32 - 1;
    format!("{}{}", NOTE_NAMES[(note % 12) as usize], octave)
}
