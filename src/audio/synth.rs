use super::{
    message::{MessageReceiver, ToneMessage},
    tone::ToneVoice,
};

/// Polyphonic tone player driven by [`ToneMessage`]s.
///
/// Runs on the audio thread: message handling and rendering never allocate.
pub struct ToneSynth<R: MessageReceiver> {
    voices: Vec<ToneVoice>,
    rx: R,
    frame_counter: u64,
}

impl<R: MessageReceiver> ToneSynth<R> {
    pub fn new(sample_rate: f32, max_voices: usize, rx: R) -> Self {
        let voices = (0..max_voices.max(1))
            .map(|_| ToneVoice::new(sample_rate))
            .collect();

        Self {
            voices,
            rx,
            frame_counter: 0,
        }
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        // Process control messages
        while let Some(msg) = self.rx.pop() {
            match msg {
                ToneMessage::Play { note, duration_ms } => {
                    let age = self.frame_counter;
                    self.allocate_voice(note).start(note, duration_ms, age);
                }
                ToneMessage::AllNotesOff => {
                    for voice in &mut self.voices {
                        voice.free();
                    }
                }
            }
        }

        out.fill(0.0);
        for voice in &mut self.voices {
            if !voice.is_free() {
                voice.render_add(out);
            }
        }
        for sample in out.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }

        self.frame_counter += out.len() as u64;
    }

    /// Voice already sounding `note`, else a free one, else the oldest
    fn allocate_voice(&mut self, note: u8) -> &mut ToneVoice {
        let idx = self
            .voices
            .iter()
            .position(|v| !v.is_free() && v.note() == note)
            .or_else(|| self.voices.iter().position(|v| v.is_free()))
            .or_else(|| {
                self.voices
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, v)| v.age())
                    .map(|(idx, _)| idx)
            })
            .unwrap_or(0);
        &mut self.voices[idx]
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| !v.is_free()).count()
    }
}
