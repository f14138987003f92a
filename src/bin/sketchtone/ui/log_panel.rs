//! Log panel widget - most recent log lines, newest on top

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_log_panel(frame: &mut Frame, area: Rect, lines: &[String]) {
    let block = Block::default().title(" Log ").borders(Borders::ALL);
    let visible = area.height.saturating_sub(2) as usize;

    let text: Vec<Line> = lines
        .iter()
        .take(visible)
        .map(|l| Line::styled(l.as_str(), Style::default().fg(Color::DarkGray)))
        .collect();

    frame.render_widget(Paragraph::new(text).block(block), area);
}
