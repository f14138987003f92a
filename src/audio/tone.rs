use std::f32::consts::TAU;

use crate::pitch::midi_to_freq;

/*
Tone Voice
==========

A single sine voice with a fixed-length linear envelope: a quick 10ms attack
up to the peak gain, then a straight ramp back to silence that ends exactly at
the requested duration.

  Level
   0.3 ┐ ╱╲
       │╱   ╲
       │      ╲
   0.0 └────────╲──→ Time
       A    Release
      10ms  (duration - 10ms)

There is no note-off: every tone is one-shot, which matches how the stroke
engine treats audio as fire-and-forget.
*/

/// Peak amplitude of a single tone
pub const TONE_GAIN: f32 = 0.3;
/// Attack time in seconds
pub const TONE_ATTACK: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneState {
    Free,
    Sounding,
}

pub struct ToneVoice {
    sample_rate: f32,
    state: ToneState,
    note: u8,
    age: u64,

    phase: f32,     // 0.0 - 1.0
    phase_inc: f32, // cycles per sample

    elapsed_samples: u32,
    attack_samples: u32,
    total_samples: u32,
}

impl ToneVoice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            state: ToneState::Free,
            note: 0,
            age: 0,
            phase: 0.0,
            phase_inc: 0.0,
            elapsed_samples: 0,
            attack_samples: 0,
            total_samples: 0,
        }
    }

    pub fn start(&mut self, note: u8, duration_ms: u32, age: u64) {
        self.note = note;
        self.age = age;
        self.state = ToneState::Sounding;
        self.phase = 0.0;
        self.phase_inc = midi_to_freq(note) / self.sample_rate;
        self.elapsed_samples = 0;
        self.total_samples = ((duration_ms as f32 / 1000.0) * self.sample_rate).max(1.0) as u32;
        self.attack_samples = ((TONE_ATTACK * self.sample_rate) as u32).min(self.total_samples);
    }

    fn level(&self) -> f32 {
        let t = self.elapsed_samples;
        if t < self.attack_samples {
            TONE_GAIN * t as f32 / self.attack_samples as f32
        } else {
            let release = (self.total_samples - self.attack_samples).max(1);
            let into_release = (t - self.attack_samples) as f32 / release as f32;
            TONE_GAIN * (1.0 - into_release).max(0.0)
        }
    }

    /// Mix this voice into `out`
    pub fn render_add(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            if self.state == ToneState::Free {
                break;
            }
            *sample += (self.phase * TAU).sin() * self.level();

            self.phase += self.phase_inc;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }

            self.elapsed_samples += 1;
            if self.elapsed_samples >= self.total_samples {
                self.free();
            }
        }
    }

    pub fn free(&mut self) {
        self.state = ToneState::Free;
        self.note = 0;
    }

    pub fn is_free(&self) -> bool {
        self.state == ToneState::Free
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn age(&self) -> u64 {
        self.age
    }
}
