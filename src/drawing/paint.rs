/// Paint primitives produced by the stroke state machine

use super::palette::PaletteColor;

/// A pointer position relative to the canvas origin, in logical pixels.
///
/// Positions are not clamped: anything the host reports (including points
/// left of or below the surface) is carried through as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One drawn line segment with round caps.
///
/// The colour and width are captured when the segment is drawn, so a later
/// palette or brush-size change never affects it.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: PaletteColor,
    pub width: u32,
}

impl Segment {
    /// Distance from `p` to the closest point of this segment.
    pub fn distance_to(&self, p: Point) -> f64 {
        let (dx, dy) = (self.to.x - self.from.x, self.to.y - self.from.y);
        let len_sq = dx * dx + dy * dy;
        let t = if len_sq == 0.0 {
            0.0
        } else {
            (((p.x - self.from.x) * dx + (p.y - self.from.y) * dy) / len_sq).clamp(0.0, 1.0)
        };
        let (cx, cy) = (self.from.x + t * dx, self.from.y + t * dy);
        ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
    }
}
