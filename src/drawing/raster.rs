/// Software raster backing the drawing canvas

use super::paint::{Point, Segment};
use crate::Result;
use base64::Engine as Base64Engine;
use image::{ImageFormat, Rgba, RgbaImage};
use sha2::{Digest, Sha256};
use std::io::Cursor;

const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// The canvas bitmap. A blank raster is fully transparent, like a freshly
/// created or cleared 2D canvas.
#[derive(Debug, Clone)]
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, BLANK),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Wipe every pixel back to blank.
    pub fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = BLANK;
        }
    }

    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| *p == BLANK)
    }

    /// RGBA value at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Number of pixels that are not blank.
    pub fn painted_pixels(&self) -> usize {
        self.image.pixels().filter(|p| **p != BLANK).count()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Stroke a segment with round caps: every pixel whose centre lies within
    /// half the width of the segment takes the segment's colour. Parts that
    /// fall outside the raster are dropped, and segments with non-finite
    /// endpoints paint nothing.
    pub fn stroke_segment(&mut self, seg: &Segment) {
        if !seg.from.is_finite() || !seg.to.is_finite() {
            return;
        }
        let radius = seg.width as f64 / 2.0;
        let (w, h) = (self.width() as f64, self.height() as f64);

        let min_x = (seg.from.x.min(seg.to.x) - radius).floor().max(0.0);
        let max_x = (seg.from.x.max(seg.to.x) + radius).ceil().min(w - 1.0);
        let min_y = (seg.from.y.min(seg.to.y) - radius).floor().max(0.0);
        let max_y = (seg.from.y.max(seg.to.y) + radius).ceil().min(h - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let color = Rgba(seg.color.rgba());
        for y in min_y as u32..=max_y as u32 {
            for x in min_x as u32..=max_x as u32 {
                let centre = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if seg.distance_to(centre) <= radius {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Encode the raster as a lossless PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.image.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// The raster as a `data:image/png;base64,...` URL.
    pub fn to_data_url(&self) -> Result<String> {
        let png = self.encode_png()?;
        Ok(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }

    /// Hex SHA-256 over the raw RGBA pixels, used for golden comparisons.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width().to_be_bytes());
        hasher.update(self.height().to_be_bytes());
        hasher.update(self.image.as_raw());
        hex::encode(hasher.finalize())
    }
}

/// Drop everything up to and including the first comma of a data URL,
/// leaving only the base64 body. Input without a comma is returned whole.
pub fn strip_data_url_prefix(data_url: &str) -> &str {
    match data_url.split_once(',') {
        Some((_, body)) => body,
        None => data_url,
    }
}
