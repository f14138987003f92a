//! Tunables for stroke timing and note output.
//!
//! Defaults reproduce the feel of a finger-painting toy: strokes live five seconds,
//! start fading halfway through, and loop their notes five times a second.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing and geometry constants shared by every stroke
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeConfig {
    /// Hard lifetime of a stroke, measured from pointer-down
    pub lifespan_ms: u64,
    /// Fraction of the lifespan after which a completed stroke starts fading
    pub fade_start_fraction: f64,
    /// Time between fading two consecutive points
    pub fade_delay_ms: u64,
    /// Time between two playback notes of a completed stroke
    pub note_interval_ms: u64,
    /// Silence after a full playback loop before the stroke may be culled
    pub loop_silence_ms: u64,
    /// Strokes whose path is no longer than this are dots
    pub dot_threshold: f64,
    /// Minimum travel from the last point before a new note is sampled
    pub note_sample_distance: f64,
}

impl StrokeConfig {
    pub fn new() -> Self {
        Self {
            lifespan_ms: 5000,
            fade_start_fraction: 0.5,
            fade_delay_ms: 50,
            note_interval_ms: 200,
            loop_silence_ms: 1000,
            dot_threshold: 10.0,
            note_sample_distance: 10.0,
        }
    }

    pub fn lifespan_ms(mut self, lifespan_ms: u64) -> Self {
        self.lifespan_ms = lifespan_ms;
        self
    }

    pub fn fade_start_fraction(mut self, fraction: f64) -> Self {
        self.fade_start_fraction = fraction;
        self
    }

    pub fn fade_delay_ms(mut self, fade_delay_ms: u64) -> Self {
        self.fade_delay_ms = fade_delay_ms;
        self
    }

    pub fn note_interval_ms(mut self, note_interval_ms: u64) -> Self {
        self.note_interval_ms = note_interval_ms;
        self
    }

    pub fn loop_silence_ms(mut self, loop_silence_ms: u64) -> Self {
        self.loop_silence_ms = loop_silence_ms;
        self
    }

    pub fn note_sample_distance(mut self, distance: f64) -> Self {
        self.note_sample_distance = distance;
        self
    }

    /// Age after which a completed stroke begins to fade
    pub fn fade_start_ms(&self) -> f64 {
        self.lifespan_ms as f64 * self.fade_start_fraction
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lifespan_ms == 0 {
            return Err(ConfigError::ZeroDuration("lifespan_ms"));
        }
        if self.note_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("note_interval_ms"));
        }
        if !(0.0..=1.0).contains(&self.fade_start_fraction) {
            return Err(ConfigError::OutOfRange {
                field: "fade_start_fraction",
                value: self.fade_start_fraction,
            });
        }
        for (field, value) in [
            ("dot_threshold", self.dot_threshold),
            ("note_sample_distance", self.note_sample_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for the rate-limited path to the audio sink
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Global minimum spacing between two dispatched play requests
    pub min_play_interval_ms: u64,
    /// Duration hint passed along with every note
    pub note_duration_ms: u32,
    /// Whether notes are dispatched at all
    pub enabled: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self {
            min_play_interval_ms: 100,
            note_duration_ms: 150,
            enabled: true,
        }
    }

    pub fn min_play_interval_ms(mut self, interval: u64) -> Self {
        self.min_play_interval_ms = interval;
        self
    }

    pub fn note_duration_ms(mut self, duration: u32) -> Self {
        self.note_duration_ms = duration;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.note_duration_ms == 0 {
            return Err(ConfigError::ZeroDuration("note_duration_ms"));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a drawing session needs
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionConfig {
    pub stroke: StrokeConfig,
    pub output: OutputConfig,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stroke.validate()?;
        self.output.validate()
    }
}

/// Errors raised when validating a configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A duration that must be positive was zero
    ZeroDuration(&'static str),
    /// A numeric value outside its allowed range
    OutOfRange { field: &'static str, value: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroDuration(field) => write!(f, "{} must be greater than zero", field),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "{} is out of range: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
