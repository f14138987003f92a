//! TUI module for sketchtone
//!
//! Mouse drawing on a terminal canvas, a status bar, and a log panel.

mod canvas;
mod log_panel;
mod status;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use std::{cell::Cell, time::Duration};
use tracing::info;

use sketchtone::{audio::AudioSink, PlaybackClock, Session};

use super::logging::LogBuffer;
use canvas::render_canvas;
use log_panel::render_log_panel;
use status::render_status;

/// Canvas units per terminal column. A one-cell move exceeds the default
/// note sampling distance, so every cell crossed can carry a note.
pub const CELL_WIDTH: f64 = 12.0;
/// Canvas units per terminal row (cells are roughly twice as tall as wide)
pub const CELL_HEIGHT: f64 = 24.0;

/// Height of the log panel including borders
const LOG_PANEL_HEIGHT: u16 = 8;

/// UI application state
pub struct UiApp<S: AudioSink> {
    session: Session<S, PlaybackClock>,
    log: LogBuffer,
    /// Inner canvas area from the last frame, used to map mouse positions
    canvas_area: Cell<Rect>,
    show_log: bool,
    should_quit: bool,
}

impl<S: AudioSink> UiApp<S> {
    pub fn new(session: Session<S, PlaybackClock>, log: LogBuffer) -> Self {
        Self {
            session,
            log,
            canvas_area: Cell::new(Rect::default()),
            show_log: true,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        info!("draw with the left mouse button");

        while !self.should_quit {
            self.session.tick();

            terminal.draw(|frame| self.render(frame))?;
            self.sync_canvas_size();

            // Handle input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code)
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Keep the pitch grid in step with the canvas after resizes
    fn sync_canvas_size(&mut self) {
        let area = self.canvas_area.get();
        let width = area.width as f64 * CELL_WIDTH;
        let height = area.height as f64 * CELL_HEIGHT;
        let mapper = self.session.mapper();
        if mapper.width() != width || mapper.height() != height {
            self.session.resize(width, height);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let enabled = !self.session.audio_enabled();
                self.session.set_audio_enabled(enabled);
                info!("sound {}", if enabled { "on" } else { "off" });
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.show_log = !self.show_log;
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = self.to_canvas(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let inside = self
                    .canvas_area
                    .get()
                    .contains(Position::new(mouse.column, mouse.row));
                if inside {
                    self.session.pointer_down(x, y);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.session.pointer_move(x, y);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.session.pointer_up();
            }
            _ => {}
        }
    }

    /// Centre of a terminal cell in canvas units
    fn to_canvas(&self, column: u16, row: u16) -> (f64, f64) {
        let area = self.canvas_area.get();
        let x = (column as f64 - area.x as f64 + 0.5) * CELL_WIDTH;
        let y = (row as f64 - area.y as f64 + 0.5) * CELL_HEIGHT;
        (x, y)
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let log_height = if self.show_log { LOG_PANEL_HEIGHT } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),          // Status bar
                Constraint::Min(6),             // Canvas
                Constraint::Length(log_height), // Log panel
                Constraint::Length(1),          // Help bar
            ])
            .split(area);

        render_status(frame, chunks[0], &self.session);

        let canvas_block = Block::default().title(" Canvas ").borders(Borders::ALL);
        let canvas_inner = canvas_block.inner(chunks[1]);
        frame.render_widget(canvas_block, chunks[1]);
        self.canvas_area.set(canvas_inner);
        render_canvas(frame, canvas_inner, &self.session);

        if self.show_log {
            render_log_panel(frame, chunks[2], &self.log.snapshot());
        }

        let help = Paragraph::new(" [Mouse] Draw  [M] Sound on/off  [D] Log  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
