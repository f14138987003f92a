use tracing::{debug, info, warn};

use super::shape::{Stroke, StrokeId};
use crate::{
    audio::{AudioSink, NoteOutput},
    config::{OutputConfig, StrokeConfig},
};

/// Owner of all live strokes.
///
/// At most one stroke is being drawn at a time (`current`); completed strokes
/// play and fade independently of each other, so several can overlap.
pub struct StrokeManager<S: AudioSink> {
    config: StrokeConfig,
    strokes: Vec<Stroke>,
    current: Option<StrokeId>,
    next_id: StrokeId,
    output: NoteOutput<S>,
}

impl<S: AudioSink> StrokeManager<S> {
    pub fn new(config: StrokeConfig, output_config: OutputConfig, sink: S) -> Self {
        Self {
            config,
            strokes: Vec::new(),
            current: None,
            next_id: 0,
            output: NoteOutput::new(sink, output_config),
        }
    }

    /// Start a stroke at `(x, y)` carrying `note`.
    ///
    /// Returns `false` without touching anything if a stroke is already being
    /// drawn or the position is invalid.
    pub fn begin_stroke(&mut self, now: u64, x: f64, y: f64, note: Option<u8>) -> bool {
        if self.current.is_some() {
            return false;
        }

        self.remove_dead(now);

        let id = self.next_id;
        let mut stroke = match Stroke::new(id, x, y, now, self.config) {
            Ok(stroke) => stroke,
            Err(err) => {
                warn!("ignoring pointer-down: {}", err);
                return false;
            }
        };
        if let Err(err) = stroke.add_point(x, y, note, now, &mut self.output) {
            warn!("ignoring pointer-down: {}", err);
            return false;
        }

        self.next_id += 1;
        self.strokes.push(stroke);
        self.current = Some(id);
        true
    }

    /// Extend the current stroke. The note is only kept when the pointer
    /// travelled more than `note_sample_distance` since the last point.
    pub fn extend_stroke(&mut self, now: u64, x: f64, y: f64, note: Option<u8>) -> bool {
        let sample_distance = self.config.note_sample_distance;
        let Some(id) = self.current else {
            return false;
        };
        let Some(stroke) = self.strokes.iter_mut().find(|s| s.id() == id) else {
            return false;
        };

        let note = note.filter(|_| stroke.last_point().distance_to(x, y) > sample_distance);
        match stroke.add_point(x, y, note, now, &mut self.output) {
            Ok(()) => true,
            Err(err) => {
                warn!("ignoring pointer-move: {}", err);
                false
            }
        }
    }

    /// Finish the current stroke, if any
    pub fn end_stroke(&mut self, now: u64) -> bool {
        let Some(stroke) = self.current_mut() else {
            return false;
        };
        stroke.complete(now);
        info!(
            "stroke {} completed with {} notes{}",
            stroke.id(),
            stroke.notes().len(),
            if stroke.is_dot() { " (dot)" } else { "" }
        );
        self.current = None;
        true
    }

    /// Advance every stroke and drop the dead ones. Returns how many were removed.
    pub fn tick(&mut self, now: u64) -> usize {
        for stroke in &mut self.strokes {
            stroke.update(now, &mut self.output);
        }
        self.remove_dead(now)
    }

    fn remove_dead(&mut self, now: u64) -> usize {
        let before = self.strokes.len();
        self.strokes.retain(|s| !s.is_dead(now));
        let removed = before - self.strokes.len();

        if let Some(id) = self.current {
            if !self.strokes.iter().any(|s| s.id() == id) {
                debug!("stroke {} expired while drawing", id);
                self.current = None;
            }
        }
        removed
    }

    fn current_mut(&mut self) -> Option<&mut Stroke> {
        let id = self.current?;
        self.strokes.iter_mut().find(|s| s.id() == id)
    }

    /// The stroke being drawn, if any
    pub fn current(&self) -> Option<&Stroke> {
        let id = self.current?;
        self.strokes.iter().find(|s| s.id() == id)
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Mute or unmute note dispatch; notes are recorded either way
    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.output.set_enabled(enabled);
    }

    pub fn audio_enabled(&self) -> bool {
        self.output.is_enabled()
    }

    pub fn output(&self) -> &NoteOutput<S> {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut NoteOutput<S> {
        &mut self.output
    }

    pub fn config(&self) -> &StrokeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SinkError;

    #[derive(Default)]
    struct Recorder(Vec<u8>);

    impl AudioSink for Recorder {
        fn play(&mut self, midi_note: u8, _duration_hint_ms: u32) -> Result<(), SinkError> {
            self.0.push(midi_note);
            Ok(())
        }
    }

    fn manager() -> StrokeManager<Recorder> {
        StrokeManager::new(StrokeConfig::new(), OutputConfig::new(), Recorder::default())
    }

    #[test]
    fn begin_creates_two_points_and_one_note() {
        let mut m = manager();
        assert!(m.begin_stroke(0, 100.0, 100.0, Some(60)));
        let stroke = m.current().unwrap();
        assert_eq!(stroke.points().len(), 2);
        assert_eq!(stroke.notes().len(), 1);
        assert_eq!(stroke.notes()[0].point_index(), 1);
        assert_eq!(m.output().sink().0, vec![60]);
    }

    #[test]
    fn second_begin_is_rejected() {
        let mut m = manager();
        assert!(m.begin_stroke(0, 10.0, 10.0, Some(60)));
        let first = m.current().unwrap().id();
        assert!(!m.begin_stroke(5, 300.0, 300.0, Some(64)));
        assert_eq!(m.len(), 1);
        assert_eq!(m.current().unwrap().id(), first);
    }

    #[test]
    fn extend_samples_notes_only_past_threshold() {
        let mut m = manager();
        m.begin_stroke(0, 0.0, 0.0, Some(60));
        assert!(m.extend_stroke(10, 6.0, 8.0, Some(62))); // exactly 10: no note
        assert!(m.extend_stroke(20, 6.0, 19.0, Some(64))); // 11: note

        let stroke = m.current().unwrap();
        assert_eq!(stroke.points().len(), 4);
        let notes: Vec<_> = stroke.notes().iter().map(|n| n.midi_note()).collect();
        assert_eq!(notes, vec![60, 64]);
        assert_eq!(stroke.notes()[1].point_index(), 3);
    }

    #[test]
    fn extend_and_end_without_stroke_are_noops() {
        let mut m = manager();
        assert!(!m.extend_stroke(0, 1.0, 1.0, Some(60)));
        assert!(!m.end_stroke(0));
        assert!(m.is_empty());
    }

    #[test]
    fn end_completes_and_frees_the_slot() {
        let mut m = manager();
        m.begin_stroke(0, 0.0, 0.0, Some(60));
        assert!(m.end_stroke(50));
        assert!(!m.is_drawing());
        assert!(m.strokes()[0].is_complete());
        assert!(m.begin_stroke(60, 200.0, 0.0, Some(69)));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn tick_removes_expired_strokes() {
        let mut m = manager();
        m.begin_stroke(0, 0.0, 0.0, Some(60));
        m.end_stroke(10);
        m.begin_stroke(3000, 50.0, 50.0, Some(62));
        m.end_stroke(3010);

        let removed: usize = (4000..=5001).step_by(50).map(|now| m.tick(now)).sum();
        assert_eq!(removed, 1);
        assert_eq!(m.len(), 1);
        assert_eq!(m.strokes()[0].created_at(), 3000);
    }

    #[test]
    fn expired_current_stroke_releases_the_slot() {
        let mut m = manager();
        m.begin_stroke(0, 0.0, 0.0, Some(60));
        m.tick(5001);
        assert!(!m.is_drawing());
        assert!(!m.extend_stroke(5002, 20.0, 0.0, Some(62)));
        assert!(m.begin_stroke(5003, 0.0, 0.0, Some(60)));
    }

    #[test]
    fn muted_manager_records_without_playing() {
        let mut m = manager();
        m.set_audio_enabled(false);
        m.begin_stroke(0, 0.0, 0.0, Some(60));
        assert_eq!(m.current().unwrap().notes().len(), 1);
        assert!(m.output().sink().0.is_empty());
        assert!(!m.audio_enabled());
    }

    #[test]
    fn invalid_pointer_down_is_ignored() {
        let mut m = manager();
        assert!(!m.begin_stroke(0, f64::NAN, 0.0, Some(60)));
        assert!(m.is_empty());
        assert!(!m.is_drawing());
    }
}
