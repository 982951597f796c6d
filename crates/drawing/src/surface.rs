//! CPU pixel surface backing the software canvas

use crate::types::Color;

/// A rectangle in surface pixel coordinates, already clipped to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Clip a signed rectangle against a `width` x `height` surface.
    /// Returns None when nothing of it is visible.
    pub fn clip(x: i64, y: i64, w: i64, h: i64, width: u32, height: u32) -> Option<Self> {
        if w <= 0 || h <= 0 {
            return None;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(width as i64);
        let y1 = (y + h).min(height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    /// Overlap of two rectangles, if any
    pub fn intersection(&self, other: &PixelRect) -> Option<PixelRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// An RGBA CPU surface with a fixed background color
pub struct CpuSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    background: Color,
    /// Pixel data in row-major order
    pixels: Vec<Color>,
}

impl CpuSurface {
    /// Create a new surface filled with the given background color
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            background,
            pixels: vec![background; pixel_count],
        }
    }

    /// Background color the surface resets to
    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Reset every pixel to the background
    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Fill a row segment `x_start..x_end` on row `y`, clamped to the surface
    #[inline]
    pub fn fill_row(&mut self, y: u32, x_start: u32, x_end: u32, color: Color) {
        if y >= self.height {
            return;
        }
        let x_end = x_end.min(self.width);
        if x_start >= x_end {
            return;
        }
        let row = (y as usize) * (self.width as usize);
        self.pixels[row + x_start as usize..row + x_end as usize].fill(color);
    }

    /// Fill a signed rectangle, never touching pixels outside `clip`.
    ///
    /// Returns the region that was touched, or None if nothing of the
    /// rectangle is visible.
    pub fn fill_rect_within(
        &mut self,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
        color: Color,
        clip: Option<PixelRect>,
    ) -> Option<PixelRect> {
        let mut rect = PixelRect::clip(x, y, w, h, self.width, self.height)?;
        if let Some(clip) = clip {
            rect = rect.intersection(&clip)?;
        }
        self.fill_pixel_rect(rect, color);
        Some(rect)
    }

    /// Paint the one-pixel border of a signed rectangle, limited to `clip`
    pub fn stroke_rect_within(
        &mut self,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
        color: Color,
        clip: Option<PixelRect>,
    ) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.fill_rect_within(x, y, w, 1, color, clip);
        self.fill_rect_within(x, y + h - 1, w, 1, color, clip);
        self.fill_rect_within(x, y, 1, h, color, clip);
        self.fill_rect_within(x + w - 1, y, 1, h, color, clip);
    }

    /// Restore a region to the background
    pub fn reset_region(&mut self, rect: PixelRect) {
        self.fill_pixel_rect(rect, self.background);
    }

    fn fill_pixel_rect(&mut self, rect: PixelRect, color: Color) {
        for row in rect.y..rect.y + rect.height {
            self.fill_row(row, rect.x, rect.x + rect.width, color);
        }
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}
