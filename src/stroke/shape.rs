use tracing::debug;

use super::point::{NoteEvent, Point, StrokeError};
use crate::{
    audio::{AudioSink, NoteOutput},
    config::StrokeConfig,
    pitch::note_name,
    render::Renderer,
};

/*
Stroke Lifecycle
================

A stroke is one pointer-down → pointer-up gesture. While the pointer is held
it grows point by point; notes sampled along the way play immediately. After
pointer-up it loops its notes and erases itself from the tail forward.

    ┌─────────┐  complete()   ┌──────────┐  is_dead()  ┌─────────┐
    │ Drawing │ ────────────→ │ Complete │ ──────────→ │ removed │
    └─────────┘               └──────────┘             └─────────┘
      add_point                 update(now):
                                  fade start  (age > lifespan * 0.5)
                                  fade step   (every fade_delay_ms)
                                  playback    (every note_interval_ms)

All timers are compared against the `now` passed in, never against frame
counts:

    fade_index          points[0..fade_index] are erased. Monotonic,
                        capped at points.len().
    playback_index      next note to play, wraps modulo notes.len().
    last_note_played_at reset by complete() so playback starts one interval
                        after pointer-up.

A stroke dies when it is fully faded, when it outlives its lifespan, or when
it has looped at least once and then stayed silent for loop_silence_ms (only
possible when ticks are sparse, since playback normally refreshes
last_note_played_at every interval).
*/

pub type StrokeId = u64;

#[derive(Debug, Clone)]
pub struct Stroke {
    id: StrokeId,
    config: StrokeConfig,

    points: Vec<Point>,
    notes: Vec<NoteEvent>,
    path_length: f64,

    created_at: u64,
    is_complete: bool,

    // Playback bookkeeping
    playback_index: usize,
    has_looped: bool,
    last_note_played_at: u64,

    // Fade bookkeeping
    fade_index: usize,
    fade_started_at: Option<u64>,
    last_fade_at: u64,
}

impl Stroke {
    /// Start a stroke at `(x, y)` with a single, silent point
    pub fn new(
        id: StrokeId,
        x: f64,
        y: f64,
        now: u64,
        config: StrokeConfig,
    ) -> Result<Self, StrokeError> {
        let first = Point::new(x, y, 0)?;
        Ok(Self {
            id,
            config,
            points: vec![first],
            notes: Vec::new(),
            path_length: 0.0,
            created_at: now,
            is_complete: false,
            playback_index: 0,
            has_looped: false,
            last_note_played_at: 0,
            fade_index: 0,
            fade_started_at: None,
            last_fade_at: 0,
        })
    }

    /// Append a point, optionally carrying a note that is played right away
    pub fn add_point<S: AudioSink>(
        &mut self,
        x: f64,
        y: f64,
        note: Option<u8>,
        now: u64,
        output: &mut NoteOutput<S>,
    ) -> Result<(), StrokeError> {
        if self.is_complete {
            return Err(StrokeError::AlreadyComplete);
        }

        let index = self.points.len();
        let point = Point::new(x, y, index)?;
        let event = note.map(|n| NoteEvent::new(n, index)).transpose()?;

        if let Some(last) = self.points.last() {
            self.path_length += last.distance_to(x, y);
        }
        self.points.push(point);

        if let Some(event) = event {
            debug!(
                "note {} recorded at ({:.0}, {:.0})",
                note_name(event.midi_note()),
                x,
                y
            );
            self.notes.push(event);
            output.trigger(now, event.midi_note());
        }

        Ok(())
    }

    /// Finish drawing; playback starts one interval from `now`
    pub fn complete(&mut self, now: u64) {
        if !self.is_complete {
            self.is_complete = true;
            self.playback_index = 0;
        }
        self.last_note_played_at = now;
    }

    /// Advance fade and playback timers
    pub fn update<S: AudioSink>(&mut self, now: u64, output: &mut NoteOutput<S>) {
        let age = now.saturating_sub(self.created_at);

        if self.is_complete
            && age as f64 > self.config.fade_start_ms()
            && self.fade_started_at.is_none()
        {
            self.fade_started_at = Some(now);
            self.last_fade_at = now;
        }

        if self.fade_started_at.is_some()
            && now.saturating_sub(self.last_fade_at) > self.config.fade_delay_ms
            && self.fade_index < self.points.len()
        {
            self.fade_index += 1;
            self.last_fade_at = now;
        }

        if self.is_complete
            && !self.notes.is_empty()
            && now.saturating_sub(self.last_note_played_at) > self.config.note_interval_ms
        {
            let note = self.notes[self.playback_index];
            output.trigger(now, note.midi_note());

            self.playback_index = (self.playback_index + 1) % self.notes.len();
            if self.playback_index == 0 {
                self.has_looped = true;
            }
            self.last_note_played_at = now;
        }
    }

    pub fn is_dead(&self, now: u64) -> bool {
        let fully_faded = self.fade_index >= self.points.len();
        let expired = now.saturating_sub(self.created_at) > self.config.lifespan_ms;
        let loop_finished = self.is_complete
            && !self.notes.is_empty()
            && self.has_looped
            && now.saturating_sub(self.last_note_played_at) > self.config.loop_silence_ms;

        fully_faded || expired || loop_finished
    }

    /// Draw the unfaded part of the stroke and the next note's anchor
    pub fn display<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        if self.fade_index >= self.points.len() {
            return;
        }

        for pair in self.points[self.fade_index..].windows(2) {
            renderer.draw_line(&pair[0], &pair[1]);
        }

        if let Some(active) = self.active_note() {
            if active.point_index() >= self.fade_index {
                renderer.draw_marker(&self.points[active.point_index()]);
            }
        }
    }

    /// The note that plays next, once the stroke is complete
    pub fn active_note(&self) -> Option<&NoteEvent> {
        if self.is_complete {
            self.notes.get(self.playback_index)
        } else {
            None
        }
    }

    /// Whether the gesture barely moved
    pub fn is_dot(&self) -> bool {
        self.path_length <= self.config.dot_threshold
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn last_point(&self) -> &Point {
        // never empty: `new` seeds the first point
        &self.points[self.points.len() - 1]
    }

    pub fn notes(&self) -> &[NoteEvent] {
        &self.notes
    }

    pub fn path_length(&self) -> f64 {
        self.path_length
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn playback_index(&self) -> usize {
        self.playback_index
    }

    pub fn fade_index(&self) -> usize {
        self.fade_index
    }

    pub fn fade_started_at(&self) -> Option<u64> {
        self.fade_started_at
    }

    pub fn last_note_played_at(&self) -> u64 {
        self.last_note_played_at
    }
}
