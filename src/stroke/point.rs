/// A position on the canvas and its 0-based order within a stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    sequence_index: usize,
}

impl Point {
    pub fn new(x: f64, y: f64, sequence_index: usize) -> Result<Self, StrokeError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(StrokeError::NonFiniteCoordinate { x, y });
        }
        Ok(Self {
            x,
            y,
            sequence_index,
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (x - self.x).hypot(y - self.y)
    }
}

/// A note anchored to one point of a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    midi_note: u8,
    point_index: usize,
}

impl NoteEvent {
    pub fn new(midi_note: u8, point_index: usize) -> Result<Self, StrokeError> {
        if midi_note > 127 {
            return Err(StrokeError::InvalidMidiNote(midi_note));
        }
        Ok(Self {
            midi_note,
            point_index,
        })
    }

    pub fn midi_note(&self) -> u8 {
        self.midi_note
    }

    /// `sequence_index` of the point this note belongs to
    pub fn point_index(&self) -> usize {
        self.point_index
    }
}

/// Errors that can occur when growing a stroke
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeError {
    /// Coordinate is NaN or infinite
    NonFiniteCoordinate { x: f64, y: f64 },
    /// MIDI notes range from 0 to 127
    InvalidMidiNote(u8),
    /// Points cannot be added after pointer-up
    AlreadyComplete,
}

impl std::fmt::Display for StrokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrokeError::NonFiniteCoordinate { x, y } => {
                write!(f, "Non-finite coordinate ({}, {})", x, y)
            }
            StrokeError::InvalidMidiNote(note) => {
                write!(f, "Invalid MIDI note {} (expected 0-127)", note)
            }
            StrokeError::AlreadyComplete => write!(f, "Stroke is already complete"),
        }
    }
}

impl std::error::Error for StrokeError {}
