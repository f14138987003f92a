//! Status bar widget - sound state, stroke count, note under the pointer

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use sketchtone::{
    audio::AudioSink,
    clock::Clock,
    pitch::{midi_to_freq, note_name},
    Session,
};

/// Render the status bar
pub fn render_status<S: AudioSink, C: Clock>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<S, C>,
) {
    let block = Block::default().title(" sketchtone ").borders(Borders::ALL);

    let strokes = session.strokes();
    let (sound_str, sound_color) = if session.audio_enabled() {
        ("● Sound on  ", Color::Green)
    } else {
        ("● Sound off  ", Color::Red)
    };
    let drawing_str = if strokes.is_drawing() { "Drawing" } else { "Idle" };

    let mut spans = vec![
        Span::styled(sound_str, Style::default().fg(sound_color)),
        Span::styled(
            format!("{}  ", drawing_str),
            Style::default().fg(if strokes.is_drawing() {
                Color::Magenta
            } else {
                Color::White
            }),
        ),
        Span::styled(
            format!("Strokes: {}  ", strokes.len()),
            Style::default().fg(Color::Cyan),
        ),
    ];

    if let Some(info) = session.last_note() {
        spans.push(Span::styled(
            format!(
                "{} ({:.1} Hz)  {}  zone {}",
                note_name(info.midi_note),
                midi_to_freq(info.midi_note),
                info.scale_name,
                info.zone_index
            ),
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
