//! sketchtone - draw in the terminal, hear your strokes
//!
//! Run with: cargo run -- [--muted] [--verbose]

mod app;
mod logging;
mod ui;

use clap::Parser;

use app::Sketchtone;
use logging::{LogBuffer, MAX_LOG_LINES};
use sketchtone::{OutputConfig, SessionConfig, StrokeConfig};

#[derive(Parser)]
#[command(name = "sketchtone")]
#[command(about = "Draw with the mouse; every stroke becomes a looping melody", long_about = None)]
struct Cli {
    /// Lifetime of a stroke in milliseconds
    #[arg(long, default_value = "5000")]
    lifespan_ms: u64,

    /// Delay between erasing two points of a fading stroke
    #[arg(long, default_value = "50")]
    fade_delay_ms: u64,

    /// Delay between two playback notes of a finished stroke
    #[arg(long, default_value = "200")]
    note_interval_ms: u64,

    /// Global minimum spacing between two played notes
    #[arg(long, default_value = "100")]
    min_play_interval_ms: u64,

    /// Length of each played tone
    #[arg(long, default_value = "150")]
    note_duration_ms: u32,

    /// Maximum simultaneous tones
    #[arg(long, default_value = "8")]
    voices: usize,

    /// Start with sound turned off (toggle with `m`)
    #[arg(long)]
    muted: bool,

    /// Log every recorded and played note
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            stroke: StrokeConfig::new()
                .lifespan_ms(self.lifespan_ms)
                .fade_delay_ms(self.fade_delay_ms)
                .note_interval_ms(self.note_interval_ms),
            output: OutputConfig::new()
                .min_play_interval_ms(self.min_play_interval_ms)
                .note_duration_ms(self.note_duration_ms)
                .enabled(!self.muted),
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log = LogBuffer::new(MAX_LOG_LINES);
    logging::init(log.clone(), cli.verbose)?;

    Sketchtone::new(cli.session_config())
        .voices(cli.voices)
        .log(log)
        .run()
}
