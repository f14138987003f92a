use sketchtone::{
    audio::{AudioSink, SinkError},
    pitch::{map_point_to_note, Quadrant},
    render::DisplayList,
    Clock, ManualClock, Session, SessionConfig,
};

/// Sink that remembers every request
#[derive(Default)]
struct Recorder {
    played: Vec<u8>,
}

impl AudioSink for Recorder {
    fn play(&mut self, midi_note: u8, _duration_hint_ms: u32) -> Result<(), SinkError> {
        self.played.push(midi_note);
        Ok(())
    }
}

/// Sink whose backend is always down
struct Broken;

impl AudioSink for Broken {
    fn play(&mut self, _midi_note: u8, _duration_hint_ms: u32) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("no device".into()))
    }
}

fn session<S: AudioSink>(sink: S) -> Session<S, ManualClock> {
    Session::new(SessionConfig::default(), 800.0, 600.0, sink, ManualClock::new(0)).unwrap()
}

#[test]
fn scenario_800x600_maps_to_quadrant_scales() {
    // zones are 400 / 6 = 66.7 wide, so an offset of 100 is the second zone
    let tl = map_point_to_note(100.0, 100.0, 800.0, 600.0);
    assert_eq!(tl.quadrant, Quadrant::TopLeft);
    assert_eq!(tl.scale_name, "C Major");
    assert_eq!(tl.zone_index, 1);
    assert_eq!(tl.midi_note, 62);

    let tr = map_point_to_note(500.0, 100.0, 800.0, 600.0);
    assert_eq!(tr.quadrant, Quadrant::TopRight);
    assert_eq!(tr.scale_name, "A Major");
    assert_eq!(tr.zone_index, 1);
    assert_eq!(tr.midi_note, 71);

    // the first zone of each half holds the tonic
    assert_eq!(map_point_to_note(50.0, 100.0, 800.0, 600.0).midi_note, 60);
    assert_eq!(map_point_to_note(450.0, 100.0, 800.0, 600.0).midi_note, 69);
}

#[test]
fn two_note_stroke_alternates_until_removed() {
    let mut s = session(Recorder::default());

    s.pointer_down(10.0, 10.0); // C Major zone 0 → 60
    s.clock().advance(16);
    s.pointer_move(150.0, 10.0); // zone 2 → 64
    let notes: Vec<u8> = s.strokes().strokes()[0]
        .notes()
        .iter()
        .map(|n| n.midi_note())
        .collect();
    assert_eq!(notes, vec![60, 64]);

    s.pointer_up();
    s.strokes_mut().output_mut().sink_mut().played.clear();

    // Tick at ~60fps until the stroke disappears, noting when each note plays
    let mut plays: Vec<(u64, u8)> = Vec::new();
    while !s.strokes().is_empty() {
        s.clock().advance(16);
        s.tick();
        let played = &s.strokes().output().sink().played;
        if played.len() > plays.len() {
            plays.push((s.clock().now_ms(), played[played.len() - 1]));
        }
    }

    assert!(plays.len() >= 4);
    for (i, (_, note)) in plays.iter().enumerate() {
        assert_eq!(*note, if i % 2 == 0 { 60 } else { 64 });
    }
    assert!(plays.windows(2).all(|w| w[1].0 - w[0].0 > 200));
    assert!(s.clock().now_ms() <= 5016 + 16);
}

#[test]
fn completed_stroke_plays_recorded_notes_in_order() {
    let mut s = session(Recorder::default());
    s.pointer_down(10.0, 10.0); // C Major zone 0 → 60
    s.clock().advance(20);
    s.pointer_move(150.0, 10.0); // zone 2 → 64
    s.pointer_up();
    s.strokes_mut().output_mut().sink_mut().played.clear();

    for _ in 0..60 {
        s.clock().advance(10);
        s.tick();
    }
    // completion at 20; plays at 230, 440
    assert_eq!(s.strokes().output().sink().played, vec![60, 64]);
}

#[test]
fn only_one_stroke_is_drawn_at_a_time() {
    let mut s = session(Recorder::default());
    assert!(s.pointer_down(10.0, 10.0));
    assert!(!s.pointer_down(500.0, 500.0));
    assert_eq!(s.strokes().len(), 1);
    assert!(s.pointer_up());
    assert!(s.pointer_down(500.0, 500.0));
    assert_eq!(s.strokes().len(), 2);
}

#[test]
fn stroke_fades_from_the_tail_and_disappears() {
    let mut s = session(Recorder::default());
    s.pointer_down(10.0, 10.0);
    for i in 1..=10 {
        s.clock().advance(16);
        s.pointer_move(10.0 + 15.0 * i as f64, 10.0);
    }
    s.pointer_up();

    let mut lines_seen = Vec::new();
    let mut last_fade = 0;
    while !s.strokes().is_empty() {
        s.clock().advance(16);
        s.tick();
        if let Some(stroke) = s.strokes().strokes().first() {
            assert!(stroke.fade_index() >= last_fade);
            last_fade = stroke.fade_index();
        }
        let mut list = DisplayList::new();
        s.render(&mut list);
        lines_seen.push(list.lines.len());
    }

    // line count only shrinks once fading starts
    let first_fade = lines_seen.iter().position(|&n| n < 11).unwrap();
    assert!(lines_seen[first_fade..].windows(2).all(|w| w[1] <= w[0]));
    // fully faded well before the hard expiry
    assert!(s.clock().now_ms() < 5000);
}

#[test]
fn audio_failures_never_stop_drawing() {
    let mut s = session(Broken);
    assert!(s.pointer_down(10.0, 10.0));
    s.clock().advance(200);
    assert!(s.pointer_move(300.0, 10.0));
    assert!(s.pointer_up());
    for _ in 0..20 {
        s.clock().advance(50);
        s.tick();
    }
    assert_eq!(s.strokes().len(), 1);
    assert!(s.strokes().strokes()[0].playback_index() < 2);
}

#[test]
fn playback_respects_the_global_rate_limit() {
    let mut s = session(Recorder::default());
    // two strokes completing together compete for the same output
    s.pointer_down(10.0, 10.0);
    s.pointer_up();
    s.pointer_down(500.0, 400.0);
    s.pointer_up();
    s.strokes_mut().output_mut().sink_mut().played.clear();

    s.clock().advance(201);
    s.tick();
    // both strokes are due, only the first request gets through
    assert_eq!(s.strokes().output().sink().played.len(), 1);
}
