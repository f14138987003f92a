pub mod audio; // Sink boundary, rate limiting, tone synth
pub mod clock;
pub mod config;
pub mod pitch; // Position → note quantization
pub mod render;
pub mod session;
pub mod stroke; // Stroke lifecycle and collection

pub use clock::{Clock, ManualClock, PlaybackClock};
pub use config::{OutputConfig, SessionConfig, StrokeConfig};
pub use session::Session;

pub const MAX_BLOCK_SIZE: usize = 2048;
