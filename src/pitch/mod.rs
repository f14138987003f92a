// Purpose: screen position → musical note quantization

pub mod mapper;
pub mod notes;

pub use mapper::{map_point_to_note, NoteInfo, PitchMapper, Quadrant, ZONES_PER_HALF};
pub use notes::{midi_to_freq, note_name};
