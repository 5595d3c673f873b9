//! Drawing surface: a fixed-size raster plus the controls that parameterize
//! and clear it.
//!
//! All state lives on the [`DrawingSurface`] value; pointer and control
//! events are delivered by calling its transition methods.

pub mod brush;
pub mod paint;
pub mod palette;
pub mod raster;
pub mod stroke;

pub use brush::{BrushSettings, BrushWidth};
pub use paint::{Point, Segment};
pub use palette::PaletteColor;
pub use raster::Raster;
pub use stroke::StrokeState;

use crate::{CanvasSize, Result};
use log::{debug, trace};

#[derive(Debug, Clone)]
pub struct DrawingSurface {
    raster: Raster,
    brush: BrushSettings,
    stroke: StrokeState,
}

impl DrawingSurface {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            raster: Raster::new(size.width, size.height),
            brush: BrushSettings::default(),
            stroke: StrokeState::default(),
        }
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    pub fn stroke(&self) -> StrokeState {
        self.stroke
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Palette button activated; applies from the next segment on.
    pub fn select_color(&mut self, color: PaletteColor) {
        debug!("brush color -> {}", color);
        self.brush.color = color;
    }

    /// Palette activation by the button's `data-color` name.
    pub fn select_color_named(&mut self, name: &str) -> Result<PaletteColor> {
        let color = name.parse()?;
        self.select_color(color);
        Ok(color)
    }

    /// Brush-size slider input with its raw text value. On rejection the
    /// current width is kept.
    pub fn set_brush_size(&mut self, raw: &str) -> Result<BrushWidth> {
        let width = BrushWidth::parse_input(raw)?;
        debug!("brush width -> {}", width.get());
        self.brush.width = width;
        Ok(width)
    }

    pub fn pointer_down(&mut self) {
        self.stroke.press();
    }

    /// Pointer moved to `at` (relative to the canvas origin). Draws and
    /// returns one segment when a stroke is in progress.
    pub fn pointer_move(&mut self, at: Point) -> Option<Segment> {
        let (from, to) = self.stroke.motion(at)?;
        let seg = Segment {
            from,
            to,
            color: self.brush.color,
            width: self.brush.width.get(),
        };
        trace!("segment {:?}", seg);
        self.raster.stroke_segment(&seg);
        Some(seg)
    }

    pub fn pointer_up(&mut self) {
        self.stroke.release();
    }

    pub fn pointer_leave(&mut self) {
        self.stroke.release();
    }

    /// Wipe the raster. Brush settings and any stroke in progress are kept.
    pub fn clear(&mut self) {
        debug!("canvas cleared");
        self.raster.clear();
    }

    /// The raster as base64 PNG text with the data-URL prefix removed.
    pub fn encode_payload(&self) -> Result<String> {
        let url = self.raster.to_data_url()?;
        Ok(raster::strip_data_url_prefix(&url).to_string())
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(CanvasSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_surface_matches_canvas_size() {
        let s = DrawingSurface::default();
        assert_eq!(s.raster().width(), 500);
        assert_eq!(s.raster().height(), 300);
        assert_eq!(s.brush(), BrushSettings::default());
    }

    #[test]
    fn segments_capture_brush_at_draw_time() {
        let mut s = DrawingSurface::default();
        s.pointer_down();
        s.pointer_move(Point::new(10.0, 10.0));
        let first = s.pointer_move(Point::new(20.0, 10.0)).unwrap();
        s.select_color(PaletteColor::Red);
        s.set_brush_size("9").unwrap();
        let second = s.pointer_move(Point::new(30.0, 10.0)).unwrap();
        assert_eq!((first.color, first.width), (PaletteColor::Black, 5));
        assert_eq!((second.color, second.width), (PaletteColor::Red, 9));
    }

    #[test]
    fn rejected_size_keeps_width() {
        let mut s = DrawingSurface::default();
        s.set_brush_size("14").unwrap();
        assert!(s.set_brush_size("huge").is_err());
        assert_eq!(s.brush().width.get(), 14);
    }

    #[test]
    fn clear_keeps_brush_and_stroke() {
        let mut s = DrawingSurface::default();
        s.select_color(PaletteColor::Green);
        s.pointer_down();
        s.pointer_move(Point::new(1.0, 1.0));
        s.pointer_move(Point::new(50.0, 50.0));
        s.clear();
        assert!(s.raster().is_blank());
        assert_eq!(s.brush().color, PaletteColor::Green);
        assert!(s.stroke().is_active());
        assert_eq!(s.stroke().pen(), Some(Point::new(50.0, 50.0)));
    }

    #[test]
    fn payload_has_no_data_url_prefix() {
        let s = DrawingSurface::new(CanvasSize { width: 8, height: 8 });
        let payload = s.encode_payload().unwrap();
        assert!(!payload.starts_with("data:"));
        assert!(payload.starts_with("iVBOR"));
    }
}
