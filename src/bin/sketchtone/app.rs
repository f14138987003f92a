//! Sketchtone - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use rtrb::{Consumer, RingBuffer};
use tracing::{info, warn};

use super::{logging::LogBuffer, ui::UiApp};

use sketchtone::{
    audio::{AudioSink, NullSink, ToneMessage, ToneSynth},
    PlaybackClock, Session, SessionConfig, MAX_BLOCK_SIZE,
};

/// Capacity of the UI → audio message ring
const MESSAGE_RING_LEN: usize = 64;

/// Main application builder
pub struct Sketchtone {
    config: SessionConfig,
    voices: usize,
    log: Option<LogBuffer>,
}

impl Sketchtone {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            voices: 8,
            log: None,
        }
    }

    /// Maximum simultaneous tones
    pub fn voices(mut self, voices: usize) -> Self {
        self.voices = voices;
        self
    }

    /// Log buffer shown in the log panel
    pub fn log(mut self, log: LogBuffer) -> Self {
        self.log = Some(log);
        self
    }

    /// Run the application until the user quits
    pub fn run(self) -> EyreResult<()> {
        let (msg_tx, msg_rx) = RingBuffer::<ToneMessage>::new(MESSAGE_RING_LEN);

        // Without an output device the toy still draws, silently
        let stream = match start_audio(msg_rx, self.voices) {
            Ok(stream) => Some(stream),
            Err(err) => {
                warn!("audio disabled: {err:#}");
                None
            }
        };
        let sink: Box<dyn AudioSink> = if stream.is_some() {
            Box::new(msg_tx)
        } else {
            Box::new(NullSink)
        };

        // Canvas size is unknown until the first frame is laid out
        let session = Session::new(self.config, 0.0, 0.0, sink, PlaybackClock::new())
            .wrap_err("invalid configuration")?;
        let log = self.log.unwrap_or_else(|| LogBuffer::new(0));

        let mut terminal = ratatui::init();
        let result = execute!(std::io::stdout(), EnableMouseCapture)
            .wrap_err("failed to enable mouse capture")
            .and_then(|_| UiApp::new(session, log).run(&mut terminal));

        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        drop(stream);
        result
    }
}

/// Open the default output device and render tones from `rx`
fn start_audio(rx: Consumer<ToneMessage>, voices: usize) -> EyreResult<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    info!("audio: {} Hz, {} channels", sample_rate, channels);

    let mut synth = ToneSynth::new(sample_rate, voices, rx);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames_remaining = total_frames - frames_written;
                let frames_to_render = frames_remaining.min(MAX_BLOCK_SIZE);

                let block = &mut render_buf[..frames_to_render];
                synth.render_block(block);

                // Copy to output (mono to all channels)
                let out_off = frames_written * channels;
                for (i, &s) in block.iter().enumerate() {
                    for ch in 0..channels {
                        data[out_off + i * channels + ch] = s;
                    }
                }

                frames_written += frames_to_render;
            }
        },
        |err| warn!("audio stream error: {}", err),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}
