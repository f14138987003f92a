// Purpose: the boundary between the stroke engine and sound output
// The engine only sees `NoteOutput`; everything below it is replaceable.

pub mod message;
pub mod sink;
pub mod synth;
pub mod tone;

pub use message::{MessageReceiver, ToneMessage};
pub use sink::{AudioSink, Dispatch, NoteOutput, NullSink, SinkError};
pub use synth::ToneSynth;
