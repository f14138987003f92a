//! Engine benchmarks: mapping, ticking, tone rendering.

use std::{collections::VecDeque, hint::black_box};

use criterion::{BenchmarkId, Criterion};
use sketchtone::{
    audio::{NullSink, ToneMessage, ToneSynth},
    pitch::map_point_to_note,
    stroke::StrokeManager,
    OutputConfig, StrokeConfig,
};

use crate::STROKE_COUNTS;

pub fn bench_pitch(c: &mut Criterion) {
    let mut group = c.benchmark_group("pitch");
    group.bench_function("map_point_to_note", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x = (x + 7.3) % 1920.0;
            black_box(map_point_to_note(black_box(x), 300.0, 1920.0, 1080.0))
        })
    });
    group.finish();
}

/// Manager holding `count` completed 40-point strokes
fn populated_manager(count: usize) -> StrokeManager<NullSink> {
    // long lifespan so nothing dies while measuring
    let config = StrokeConfig::new().lifespan_ms(u64::MAX / 2);
    let mut manager = StrokeManager::new(config, OutputConfig::new(), NullSink);
    for s in 0..count {
        let y = s as f64 * 4.0;
        manager.begin_stroke(0, 0.0, y, Some(60));
        for p in 1..40 {
            let x = p as f64 * 12.0;
            let note = map_point_to_note(x, y, 960.0, 540.0).midi_note;
            manager.extend_stroke(0, x, y, Some(note));
        }
        manager.end_stroke(0);
    }
    manager
}

pub fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("strokes/tick");
    for &count in STROKE_COUNTS {
        let mut manager = populated_manager(count);
        let mut now = 0u64;
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                now += 16;
                black_box(manager.tick(black_box(now)))
            })
        });
    }
    group.finish();
}

pub fn bench_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/render");
    for &voices in &[1usize, 8] {
        let msgs: VecDeque<ToneMessage> = (0..voices)
            .map(|i| ToneMessage::Play {
                note: 60 + i as u8,
                duration_ms: u32::MAX / 1000,
            })
            .collect();
        let mut synth = ToneSynth::new(48_000.0, voices, msgs);
        let mut buffer = vec![0.0f32; 512];
        group.bench_with_input(BenchmarkId::from_parameter(voices), &voices, |b, _| {
            b.iter(|| synth.render_block(black_box(&mut buffer)))
        });
    }
    group.finish();
}
