/// Stroke session state machine
///
/// `Idle` means the pointer is up. `Active` means it is down; `pen` is the
/// end of the current path, or `None` until the first move of the stroke
/// places it.

use super::paint::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Active { pen: Option<Point> },
}

impl StrokeState {
    /// Pointer pressed on the surface. Pressing again mid-stroke keeps the
    /// current path.
    pub fn press(&mut self) {
        if let StrokeState::Idle = self {
            *self = StrokeState::Active { pen: None };
        }
    }

    /// Pointer moved. Returns the `(from, to)` pair to draw when the stroke
    /// is active and already has a pen position; the pen then moves to `to`.
    pub fn motion(&mut self, to: Point) -> Option<(Point, Point)> {
        match self {
            StrokeState::Idle => None,
            StrokeState::Active { pen } => {
                let from = pen.replace(to);
                from.map(|from| (from, to))
            }
        }
    }

    /// Pointer released or left the surface; the path is reset so the next
    /// stroke does not connect to this one.
    pub fn release(&mut self) {
        *self = StrokeState::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self, StrokeState::Active { .. })
    }

    pub fn pen(&self) -> Option<Point> {
        match self {
            StrokeState::Idle => None,
            StrokeState::Active { pen } => *pen,
        }
    }
}
