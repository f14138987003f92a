// Purpose: drawn gestures, their notes, and their fade/playback timers

pub mod manager;
pub mod point;
pub mod shape;

pub use manager::StrokeManager;
pub use point::{NoteEvent, Point, StrokeError};
pub use shape::{Stroke, StrokeId};
