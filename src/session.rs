//! Input-driven drawing session.
//!
//! A [`Session`] owns everything that used to be global in a sketch: the
//! canvas-bound pitch mapper, the stroke collection with its "currently
//! drawing" slot, the audio output and the clock. Front ends forward pointer
//! events and call [`Session::tick`] once per frame.

use tracing::debug;

use crate::{
    audio::AudioSink,
    clock::Clock,
    config::{ConfigError, SessionConfig},
    pitch::{note_name, NoteInfo, PitchMapper},
    render::Renderer,
    stroke::StrokeManager,
};

pub struct Session<S: AudioSink, C: Clock> {
    mapper: PitchMapper,
    strokes: StrokeManager<S>,
    clock: C,
    last_note: Option<NoteInfo>,
}

impl<S: AudioSink, C: Clock> Session<S, C> {
    pub fn new(
        config: SessionConfig,
        width: f64,
        height: f64,
        sink: S,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            mapper: PitchMapper::new(width, height),
            strokes: StrokeManager::new(config.stroke, config.output, sink),
            clock,
            last_note: None,
        })
    }

    fn sample(&mut self, x: f64, y: f64) -> NoteInfo {
        let info = self.mapper.map(x, y);
        self.last_note = Some(info);
        info
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let now = self.clock.now_ms();
        let info = self.sample(x, y);
        debug!(
            "pointer down: {} in {} (zone {})",
            note_name(info.midi_note),
            info.scale_name,
            info.zone_index
        );
        self.strokes.begin_stroke(now, x, y, Some(info.midi_note))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.strokes.is_drawing() {
            return false;
        }
        let now = self.clock.now_ms();
        let info = self.sample(x, y);
        self.strokes.extend_stroke(now, x, y, Some(info.midi_note))
    }

    pub fn pointer_up(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.strokes.end_stroke(now)
    }

    /// Advance all strokes to the clock's current time
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.strokes.tick(now)
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for stroke in self.strokes.strokes() {
            stroke.display(renderer);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.mapper.resize(width, height);
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.strokes.set_audio_enabled(enabled);
    }

    pub fn audio_enabled(&self) -> bool {
        self.strokes.audio_enabled()
    }

    /// Note under the pointer at the last pointer event
    pub fn last_note(&self) -> Option<NoteInfo> {
        self.last_note
    }

    pub fn mapper(&self) -> &PitchMapper {
        &self.mapper
    }

    pub fn strokes(&self) -> &StrokeManager<S> {
        &self.strokes
    }

    pub fn strokes_mut(&mut self) -> &mut StrokeManager<S> {
        &mut self.strokes
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::NullSink,
        clock::ManualClock,
        config::StrokeConfig,
        pitch::Quadrant,
        render::DisplayList,
    };

    fn session() -> Session<NullSink, ManualClock> {
        Session::new(
            SessionConfig::default(),
            800.0,
            600.0,
            NullSink,
            ManualClock::new(0),
        )
        .unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SessionConfig {
            stroke: StrokeConfig::new().lifespan_ms(0),
            ..Default::default()
        };
        assert!(Session::new(config, 800.0, 600.0, NullSink, ManualClock::new(0)).is_err());
    }

    #[test]
    fn pointer_events_build_a_stroke() {
        let mut s = session();
        assert!(s.pointer_down(100.0, 100.0));
        s.clock().advance(16);
        assert!(s.pointer_move(500.0, 100.0));
        assert_eq!(s.last_note().unwrap().quadrant, Quadrant::TopRight);
        assert!(s.pointer_up());

        let stroke = &s.strokes().strokes()[0];
        let notes: Vec<_> = stroke.notes().iter().map(|n| n.midi_note()).collect();
        assert_eq!(notes, vec![62, 71]);
    }

    #[test]
    fn moves_without_pointer_down_are_ignored() {
        let mut s = session();
        assert!(!s.pointer_move(10.0, 10.0));
        assert!(!s.pointer_up());
        assert!(s.strokes().is_empty());
    }

    #[test]
    fn render_walks_every_stroke() {
        let mut s = session();
        s.pointer_down(10.0, 10.0);
        s.pointer_move(50.0, 10.0);
        s.pointer_up();
        s.pointer_down(410.0, 310.0);
        s.pointer_move(450.0, 310.0);

        let mut list = DisplayList::new();
        s.render(&mut list);
        // each stroke: duplicate first point + one move = 2 segments
        assert_eq!(list.lines.len(), 4);
        assert_eq!(list.markers.len(), 1);
    }

    #[test]
    fn tick_uses_the_clock() {
        let mut s = session();
        s.pointer_down(10.0, 10.0);
        s.pointer_up();
        s.clock().set(5001);
        assert_eq!(s.tick(), 1);
        assert!(s.strokes().is_empty());
    }
}
