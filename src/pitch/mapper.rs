use super::notes::{A_MAJOR, C_MAJOR, F_MAJOR, G_MAJOR};

/*
Pitch Mapping
=============

The canvas is split into four quadrants by the midpoints of its width and
height. Each quadrant owns one 8-note scale. Inside the horizontal half that
holds the point, the half's width is cut into 6 equal zones and the zone index
picks the scale degree:

    0            W/2            W
    ┌─┬─┬─┬─┬─┬─┬─┬─┬─┬─┬─┬─┐ 0
    │0│1│2│3│4│5│0│1│2│3│4│5│      top-left: C major   top-right: A major
    ├─┴─┴─┴─┴─┴─┼─┴─┴─┴─┴─┴─┤ H/2
    │0 1 2 3 4 5│0 1 2 3 4 5│      bottom-left: G major  bottom-right: F major
    └───────────┴───────────┘ H

    zone_width = (W / 2) / 6
    zone_index = floor(relative_x / zone_width)
    note_index = zone_index mod 8

Only 6 zones exist per half, so scale degrees 6 and 7 are out of reach for
points inside the canvas. The right edge itself (x == W) lands in zone 6.

Coordinates are clamped to the canvas before mapping, so points left of or
above the canvas resolve to zone 0 of the nearest quadrant.
*/

/// Number of equal-width zones in each horizontal half of the canvas.
pub const ZONES_PER_HALF: u32 = 6;

/// One of the four screen regions, each bound to a fixed scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub fn scale(self) -> &'static [u8; 8] {
        match self {
            Quadrant::TopLeft => &C_MAJOR,
            Quadrant::TopRight => &A_MAJOR,
            Quadrant::BottomLeft => &G_MAJOR,
            Quadrant::BottomRight => &F_MAJOR,
        }
    }

    pub fn scale_name(self) -> &'static str {
        match self {
            Quadrant::TopLeft => "C Major",
            Quadrant::TopRight => "A Major",
            Quadrant::BottomLeft => "G Major",
            Quadrant::BottomRight => "F Major",
        }
    }

    pub fn is_left(self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::BottomLeft)
    }
}

/// Result of quantizing a canvas position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteInfo {
    pub midi_note: u8,
    pub scale_name: &'static str,
    pub quadrant: Quadrant,
    pub zone_index: i64,
}

/// Quantize a point on a `width` x `height` canvas to a note.
///
/// Pure and total: any input, including NaN or points off the canvas, maps to
/// some note. A degenerate canvas (non-positive or non-finite size) maps every
/// point to zone 0.
pub fn map_point_to_note(x: f64, y: f64, width: f64, height: f64) -> NoteInfo {
    let width = sanitize_extent(width);
    let height = sanitize_extent(height);
    let x = x.clamp(0.0, width);
    let y = y.clamp(0.0, height);

    let half_width = width / 2.0;
    let left = x < half_width;
    let top = y < height / 2.0;

    let quadrant = match (left, top) {
        (true, true) => Quadrant::TopLeft,
        (false, true) => Quadrant::TopRight,
        (true, false) => Quadrant::BottomLeft,
        (false, false) => Quadrant::BottomRight,
    };

    let zone_width = half_width / ZONES_PER_HALF as f64;
    let relative_x = if left { x } else { x - half_width };
    // NaN floors to 0 under the saturating cast
    let zone_index = if zone_width > 0.0 {
        (relative_x / zone_width).floor() as i64
    } else {
        0
    };

    let note_index = zone_index.rem_euclid(8) as usize;

    NoteInfo {
        midi_note: quadrant.scale()[note_index],
        scale_name: quadrant.scale_name(),
        quadrant,
        zone_index,
    }
}

fn sanitize_extent(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

/// Canvas-bound pitch mapper.
///
/// Holds the current canvas size so input handlers only pass coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchMapper {
    width: f64,
    height: f64,
}

impl PitchMapper {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Update the canvas size (e.g. after a window resize)
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn map(&self, x: f64, y: f64) -> NoteInfo {
        map_point_to_note(x, y, self.width, self.height)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}
