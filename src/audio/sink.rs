use tracing::{debug, trace, warn};

use crate::{config::OutputConfig, pitch::note_name};

/// "Play this note now" capability.
///
/// Implementations are fire-and-forget: once `play` returns, the caller does
/// not track or cancel the request.
pub trait AudioSink {
    fn play(&mut self, midi_note: u8, duration_hint_ms: u32) -> Result<(), SinkError>;

    /// Cut every sounding note short. Sinks without held notes ignore it.
    fn silence(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Allow boxed sinks to be used as sinks (for dynamic dispatch)
impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn play(&mut self, midi_note: u8, duration_hint_ms: u32) -> Result<(), SinkError> {
        (**self).play(midi_note, duration_hint_ms)
    }

    fn silence(&mut self) -> Result<(), SinkError> {
        (**self).silence()
    }
}

/// Sink that accepts and discards everything (no audio device)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _midi_note: u8, _duration_hint_ms: u32) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Reasons a sink could not take a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The queue to the audio thread is full
    QueueFull,
    /// The backend is not running
    Unavailable(String),
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::QueueFull => write!(f, "audio queue is full"),
            SinkError::Unavailable(reason) => write!(f, "audio unavailable: {}", reason),
        }
    }
}

impl std::error::Error for SinkError {}

/// What happened to a note handed to [`NoteOutput::trigger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Passed to the sink
    Sent,
    /// Too close to the previous request, dropped
    RateLimited,
    /// Output disabled, dropped
    Muted,
    /// The sink rejected it (logged)
    Failed,
}

/// Rate-limited, mutable front of an [`AudioSink`].
///
/// All strokes share one `NoteOutput`, so the minimum interval applies
/// globally. Requests arriving inside the interval are dropped, not queued.
pub struct NoteOutput<S: AudioSink> {
    sink: S,
    min_interval_ms: u64,
    note_duration_ms: u32,
    enabled: bool,
    last_sent_at: Option<u64>,
}

impl<S: AudioSink> NoteOutput<S> {
    pub fn new(sink: S, config: OutputConfig) -> Self {
        Self {
            sink,
            min_interval_ms: config.min_play_interval_ms,
            note_duration_ms: config.note_duration_ms,
            enabled: config.enabled,
            last_sent_at: None,
        }
    }

    /// Request `midi_note` at time `now`. Never fails; sink errors are logged.
    pub fn trigger(&mut self, now: u64, midi_note: u8) -> Dispatch {
        if !self.enabled {
            return Dispatch::Muted;
        }

        if let Some(last) = self.last_sent_at {
            if now.saturating_sub(last) < self.min_interval_ms {
                trace!(note = midi_note, "rate limited");
                return Dispatch::RateLimited;
            }
        }
        self.last_sent_at = Some(now);

        match self.sink.play(midi_note, self.note_duration_ms) {
            Ok(()) => {
                debug!("played {}", note_name(midi_note));
                Dispatch::Sent
            }
            Err(err) => {
                warn!("failed to play {}: {}", note_name(midi_note), err);
                Dispatch::Failed
            }
        }
    }

    /// Muting also silences whatever the sink is still sounding
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            if let Err(err) = self.sink.silence() {
                warn!("failed to silence output: {}", err);
            }
        }
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
