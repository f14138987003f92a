//! Drawing canvas widget - strokes, playback markers, quadrant grid

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Circle, Line as CanvasLine},
    Frame,
};

use sketchtone::{
    audio::AudioSink,
    clock::Clock,
    pitch::Quadrant,
    render::DisplayList,
    Session,
};

/// Hot pink, the toy's stroke colour
const STROKE_COLOR: Color = Color::Rgb(255, 105, 180);
const MARKER_COLOR: Color = Color::Yellow;
const GRID_COLOR: Color = Color::DarkGray;
const MARKER_RADIUS: f64 = 6.0;

/// Render every live stroke of `session` into `area`
pub fn render_canvas<S: AudioSink, C: Clock>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<S, C>,
) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let width = session.mapper().width();
    let height = session.mapper().height();
    // not sized until the frame after the first layout
    if width <= 0.0 || height <= 0.0 {
        return;
    }

    let mut list = DisplayList::new();
    session.render(&mut list);

    // Canvas y grows upwards, screen y grows downwards
    let flip = |y: f64| height - y;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            ctx.draw(&CanvasLine {
                x1: width / 2.0,
                y1: 0.0,
                x2: width / 2.0,
                y2: height,
                color: GRID_COLOR,
            });
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: height / 2.0,
                x2: width,
                y2: height / 2.0,
                color: GRID_COLOR,
            });
            for quadrant in [
                Quadrant::TopLeft,
                Quadrant::TopRight,
                Quadrant::BottomLeft,
                Quadrant::BottomRight,
            ] {
                let x = if quadrant.is_left() { 0.0 } else { width / 2.0 };
                let y = match quadrant {
                    Quadrant::TopLeft | Quadrant::TopRight => height,
                    _ => height / 2.0,
                };
                ctx.print(
                    x + 6.0,
                    y - 12.0,
                    Span::styled(quadrant.scale_name(), Style::default().fg(GRID_COLOR)),
                );
            }

            ctx.layer();

            for (from, to) in &list.lines {
                ctx.draw(&CanvasLine {
                    x1: from.x(),
                    y1: flip(from.y()),
                    x2: to.x(),
                    y2: flip(to.y()),
                    color: STROKE_COLOR,
                });
            }
            for at in &list.markers {
                ctx.draw(&Circle {
                    x: at.x(),
                    y: flip(at.y()),
                    radius: MARKER_RADIUS,
                    color: MARKER_COLOR,
                });
            }
        });

    frame.render_widget(canvas, area);
}
