//! CPU-backed canvas keeping a z-ordered primitive table

use std::collections::BTreeMap;

use glam::IVec2;
use polydraw_config::CanvasConfig;
use tracing::{debug, trace};

use super::{Canvas, Primitive};
use crate::surface::{CpuSurface, PixelRect};
use crate::types::{Color, PrimitiveHandle};

/// Software implementation of [`Canvas`].
///
/// Primitives are kept in creation order, which is also the paint order.
/// Canvas space has its origin at the centre of the surface. Erasing or
/// recoloring a primitive resets its footprint to the background and
/// repaints every primitive overlapping it, so pixels always reflect the
/// primitive table.
pub struct SoftwareCanvas {
    surface: CpuSurface,
    primitives: BTreeMap<PrimitiveHandle, Primitive>,
    next_handle: u64,
    origin: IVec2,
}

impl SoftwareCanvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            surface: CpuSurface::new(width, height, background),
            primitives: BTreeMap::new(),
            next_handle: 1,
            origin: IVec2::new((width / 2) as i32, (height / 2) as i32),
        }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(config.width, config.height, config.background)
    }

    /// Look up a live primitive
    pub fn primitive(&self, handle: PrimitiveHandle) -> Option<&Primitive> {
        self.primitives.get(&handle)
    }

    /// Number of live primitives
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Iterate live primitives in paint order
    pub fn primitives(&self) -> impl Iterator<Item = (PrimitiveHandle, &Primitive)> {
        self.primitives.iter().map(|(h, p)| (*h, p))
    }

    /// Pixel color at a canvas-space coordinate
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<Color> {
        let sx = x.checked_add(self.origin.x)?;
        let sy = y.checked_add(self.origin.y)?;
        if sx < 0 || sy < 0 {
            return None;
        }
        self.surface.get_pixel(sx as u32, sy as u32)
    }

    /// Composited pixel buffer
    pub fn surface(&self) -> &CpuSurface {
        &self.surface
    }

    /// Drop every primitive and reset the surface
    pub fn clear(&mut self) {
        debug!("Clearing canvas ({} primitives)", self.primitives.len());
        self.primitives.clear();
        self.surface.clear();
    }

    fn insert(&mut self, primitive: Primitive) -> PrimitiveHandle {
        let handle = PrimitiveHandle(self.next_handle);
        self.next_handle += 1;
        self.paint(&primitive, None);
        self.primitives.insert(handle, primitive);
        handle
    }

    /// Footprint of a primitive on the surface, if visible
    fn footprint(&self, primitive: &Primitive) -> Option<PixelRect> {
        let (x, y, w, h) = self.to_surface(primitive.bounds());
        PixelRect::clip(x, y, w, h, self.surface.width, self.surface.height)
    }

    fn to_surface(&self, (x, y, w, h): (i64, i64, i64, i64)) -> (i64, i64, i64, i64) {
        (x + self.origin.x as i64, y + self.origin.y as i64, w, h)
    }

    fn paint(&mut self, primitive: &Primitive, clip: Option<PixelRect>) {
        let (x, y, w, h) = self.to_surface(primitive.bounds());
        match *primitive {
            Primitive::Rect { fill, outline, .. } => {
                self.surface.fill_rect_within(x, y, w, h, fill, clip);
                if outline != fill {
                    self.surface.stroke_rect_within(x, y, w, h, outline, clip);
                }
            }
            Primitive::Span { color, .. } => {
                self.surface.fill_rect_within(x, y, w, h, color, clip);
            }
        }
    }

    /// Reset a region and repaint every primitive overlapping it, in order
    fn recomposite(&mut self, region: PixelRect) {
        self.surface.reset_region(region);

        let overlapping: Vec<Primitive> = self
            .primitives
            .values()
            .filter(|p| {
                self.footprint(p)
                    .is_some_and(|fp| fp.intersection(&region).is_some())
            })
            .copied()
            .collect();

        trace!(
            "Recompositing {}x{} at ({}, {}): {} primitives",
            region.width,
            region.height,
            region.x,
            region.y,
            overlapping.len()
        );

        for primitive in &overlapping {
            self.paint(primitive, Some(region));
        }
    }

    fn update(&mut self, handle: PrimitiveHandle, f: impl FnOnce(&mut Primitive) -> bool) -> bool {
        let Some(primitive) = self.primitives.get_mut(&handle) else {
            return false;
        };
        if !f(primitive) {
            return false;
        }
        let updated = *primitive;
        if let Some(region) = self.footprint(&updated) {
            self.recomposite(region);
        }
        true
    }
}

impl Canvas for SoftwareCanvas {
    fn draw_filled_rect(&mut self, x: i32, y: i32, size: i32, color: Color) -> PrimitiveHandle {
        self.insert(Primitive::Rect {
            x,
            y,
            size: size.max(1),
            fill: color,
            outline: color,
        })
    }

    fn draw_horizontal_span(&mut self, x1: i32, x2: i32, y: i32, color: Color) -> PrimitiveHandle {
        self.insert(Primitive::Span { x1, x2, y, color })
    }

    fn erase(&mut self, handle: PrimitiveHandle) -> bool {
        let Some(primitive) = self.primitives.remove(&handle) else {
            trace!("erase: unknown handle {}", handle);
            return false;
        };
        if let Some(region) = self.footprint(&primitive) {
            self.recomposite(region);
        }
        true
    }

    fn recolor(&mut self, handle: PrimitiveHandle, color: Color) -> bool {
        self.update(handle, |primitive| {
            match primitive {
                Primitive::Rect { fill, outline, .. } => {
                    *fill = color;
                    *outline = color;
                }
                Primitive::Span { color: c, .. } => *c = color,
            }
            true
        })
    }

    fn set_outline(&mut self, handle: PrimitiveHandle, color: Color) -> bool {
        self.update(handle, |primitive| match primitive {
            Primitive::Rect { outline, .. } => {
                *outline = color;
                true
            }
            Primitive::Span { .. } => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BLACK, BLUE, RED, WHITE};

    fn canvas() -> SoftwareCanvas {
        SoftwareCanvas::new(64, 64, WHITE)
    }

    #[test]
    fn test_origin_is_centre() {
        let mut canvas = canvas();
        canvas.draw_filled_rect(0, 0, 1, BLACK);
        assert_eq!(canvas.surface().get_pixel(32, 32), Some(BLACK));
        assert_eq!(canvas.pixel_at(0, 0), Some(BLACK));
        assert_eq!(canvas.pixel_at(-1, 0), Some(WHITE));
    }

    #[test]
    fn test_handles_are_unique() {
        let mut canvas = canvas();
        let a = canvas.draw_filled_rect(0, 0, 2, BLACK);
        let b = canvas.draw_filled_rect(0, 0, 2, BLACK);
        assert_ne!(a, b);
        assert_eq!(canvas.primitive_count(), 2);
    }

    #[test]
    fn test_span_is_inclusive() {
        let mut canvas = canvas();
        canvas.draw_horizontal_span(-2, 2, 5, BLUE);
        for x in -2..=2 {
            assert_eq!(canvas.pixel_at(x, 5), Some(BLUE));
        }
        assert_eq!(canvas.pixel_at(3, 5), Some(WHITE));
        assert_eq!(canvas.pixel_at(-3, 5), Some(WHITE));
    }

    #[test]
    fn test_erase_restores_background() {
        let mut canvas = canvas();
        let handle = canvas.draw_filled_rect(4, 4, 3, BLACK);
        assert!(canvas.erase(handle));
        assert_eq!(canvas.pixel_at(5, 5), Some(WHITE));
        assert_eq!(canvas.primitive_count(), 0);

        // Second erase is a no-op
        assert!(!canvas.erase(handle));
    }

    #[test]
    fn test_erase_repaints_overlapping() {
        let mut canvas = canvas();
        let under = canvas.draw_filled_rect(0, 0, 4, BLUE);
        let over = canvas.draw_filled_rect(2, 2, 4, BLACK);
        assert_eq!(canvas.pixel_at(3, 3), Some(BLACK));

        assert!(canvas.erase(over));
        assert_eq!(canvas.pixel_at(3, 3), Some(BLUE));
        assert_eq!(canvas.pixel_at(5, 5), Some(WHITE));
        assert!(canvas.primitive(under).is_some());
    }

    #[test]
    fn test_recolor_keeps_z_order() {
        let mut canvas = canvas();
        let under = canvas.draw_filled_rect(0, 0, 4, BLUE);
        canvas.draw_filled_rect(2, 2, 4, BLACK);

        assert!(canvas.recolor(under, RED));
        assert_eq!(canvas.pixel_at(0, 0), Some(RED));
        // Still covered by the later primitive
        assert_eq!(canvas.pixel_at(3, 3), Some(BLACK));
    }

    #[test]
    fn test_set_outline() {
        let mut canvas = canvas();
        let rect = canvas.draw_filled_rect(0, 0, 5, BLACK);
        assert!(canvas.set_outline(rect, RED));

        assert_eq!(canvas.pixel_at(0, 0), Some(RED));
        assert_eq!(canvas.pixel_at(4, 2), Some(RED));
        assert_eq!(canvas.pixel_at(2, 2), Some(BLACK));

        let span = canvas.draw_horizontal_span(0, 3, 10, BLACK);
        assert!(!canvas.set_outline(span, RED));
        assert!(!canvas.set_outline(PrimitiveHandle(999), RED));
    }

    #[test]
    fn test_off_surface_primitives_are_tracked() {
        let mut canvas = canvas();
        let handle = canvas.draw_filled_rect(1000, 1000, 2, BLACK);
        assert!(canvas.primitive(handle).is_some());
        assert!(canvas.recolor(handle, RED));
        assert!(canvas.erase(handle));
    }

    #[test]
    fn test_clear() {
        let mut canvas = canvas();
        canvas.draw_filled_rect(0, 0, 4, BLACK);
        canvas.clear();
        assert_eq!(canvas.primitive_count(), 0);
        assert_eq!(canvas.pixel_at(1, 1), Some(WHITE));
        assert!(canvas.surface().pixels().iter().all(|p| *p == WHITE));

        // Handles keep counting after a clear
        let handle = canvas.draw_filled_rect(0, 0, 1, BLACK);
        assert!(handle.0 > 1);
    }
}
