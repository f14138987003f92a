//! Drawing surface consumed by [`Stroke::display`](crate::stroke::Stroke::display).

use crate::stroke::Point;

/// Minimal vector drawing capability
pub trait Renderer {
    /// Draw a segment between two consecutive stroke points
    fn draw_line(&mut self, from: &Point, to: &Point);

    /// Highlight the point whose note plays next
    fn draw_marker(&mut self, at: &Point);
}

/// Renderer that records calls, useful for headless frontends and tests
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    pub lines: Vec<(Point, Point)>,
    pub markers: Vec<Point>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.markers.clear();
    }
}

impl Renderer for DisplayList {
    fn draw_line(&mut self, from: &Point, to: &Point) {
        self.lines.push((*from, *to));
    }

    fn draw_marker(&mut self, at: &Point) {
        self.markers.push(*at);
    }
}
