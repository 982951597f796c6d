//! Free-standing line segment shape

use tracing::trace;

use crate::canvas::Canvas;
use crate::polygon::ShapeStyle;
use crate::raster::RasterLine;
use crate::selection::point_near_segment;
use crate::types::{Color, Point, PrimitiveHandle, ShapeId};
use crate::validation::{GeometryError, checked_point, flip_y, validate_brush_size};

/// A segment between two math-space points, drawn with a raster strategy.
/// Lines can be moved but not transformed.
#[derive(Debug)]
pub struct LineShape {
    id: ShapeId,
    start: Point,
    end: Point,
    style: ShapeStyle,
    outline: Option<Color>,
    handles: Vec<PrimitiveHandle>,
}

impl LineShape {
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Result<Self, GeometryError> {
        validate_brush_size(style.brush_size)?;
        let start = checked_point(i64::from(start.x), i64::from(start.y))?;
        let end = checked_point(i64::from(end.x), i64::from(end.y))?;
        Ok(Self {
            id: ShapeId::next(),
            start,
            end,
            style,
            outline: None,
            handles: Vec::new(),
        })
    }

    #[inline]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[inline]
    pub fn endpoints(&self) -> (Point, Point) {
        (self.start, self.end)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.style.color
    }

    #[inline]
    pub fn is_drawn(&self) -> bool {
        !self.handles.is_empty()
    }

    pub fn handles(&self) -> &[PrimitiveHandle] {
        &self.handles
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.erase(canvas);
        let output = self.style.strategy.draw(
            canvas,
            self.style.color,
            self.style.brush_size,
            flip_y(self.start),
            flip_y(self.end),
        );
        trace!("Drew {} with {} cells", self.id, output.cells.len());
        self.handles = output.handles;
        if let Some(outline) = self.outline {
            self.paint_outline(canvas, outline);
        }
    }

    /// Returns false if nothing was drawn
    pub fn erase(&mut self, canvas: &mut dyn Canvas) -> bool {
        if self.handles.is_empty() {
            return false;
        }
        for handle in self.handles.drain(..) {
            canvas.erase(handle);
        }
        true
    }

    pub fn change_color(&mut self, canvas: &mut dyn Canvas, color: Color) {
        self.style.color = color;
        for handle in &self.handles {
            canvas.recolor(*handle, color);
        }
        if let Some(outline) = self.outline {
            self.paint_outline(canvas, outline);
        }
    }

    pub fn change_outline(&mut self, canvas: &mut dyn Canvas, color: Color) {
        self.outline = Some(color);
        self.paint_outline(canvas, color);
    }

    pub fn restore_outline(&mut self, canvas: &mut dyn Canvas) {
        self.outline = None;
        self.paint_outline(canvas, self.style.color);
    }

    fn paint_outline(&self, canvas: &mut dyn Canvas, color: Color) {
        for handle in &self.handles {
            canvas.set_outline(*handle, color);
        }
    }

    /// Move both endpoints and redraw. Nothing moves if either endpoint
    /// would leave the coordinate range.
    pub fn translate(
        &mut self,
        canvas: &mut dyn Canvas,
        dx: i32,
        dy: i32,
    ) -> Result<(), GeometryError> {
        let shift =
            |p: Point| checked_point(i64::from(p.x) + i64::from(dx), i64::from(p.y) + i64::from(dy));
        let (start, end) = (shift(self.start)?, shift(self.end)?);
        self.start = start;
        self.end = end;
        self.draw(canvas);
        Ok(())
    }

    /// Whether a math-space point lies within `threshold` of the segment
    pub fn is_near(&self, point: Point, threshold: f64) -> bool {
        point_near_segment(point, self.start, self.end, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SoftwareCanvas;
    use crate::constants::{BLACK, BLUE, RED, WHITE};
    use glam::IVec2;

    fn line() -> LineShape {
        LineShape::new(IVec2::new(0, 0), IVec2::new(20, 10), ShapeStyle::default()).unwrap()
    }

    #[test]
    fn test_draw_erase() {
        let mut canvas = SoftwareCanvas::new(64, 64, WHITE);
        let mut line = line();
        line.draw(&mut canvas);
        assert_eq!(line.handles().len(), 21);
        // Endpoint in canvas space has Y negated
        assert_eq!(canvas.pixel_at(20, -10), Some(BLACK));

        assert!(line.erase(&mut canvas));
        assert!(!line.erase(&mut canvas));
        assert_eq!(canvas.primitive_count(), 0);
    }

    #[test]
    fn test_change_color_and_translate() {
        let mut canvas = SoftwareCanvas::new(64, 64, WHITE);
        let mut line = line();
        line.draw(&mut canvas);
        line.change_color(&mut canvas, BLUE);
        assert_eq!(canvas.pixel_at(0, 0), Some(BLUE));

        line.translate(&mut canvas, 0, 5).unwrap();
        assert_eq!(line.endpoints(), (IVec2::new(0, 5), IVec2::new(20, 15)));
        assert_eq!(canvas.pixel_at(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel_at(0, -5), Some(BLUE));

        assert!(line.translate(&mut canvas, 0, i32::MIN).is_err());
        assert_eq!(line.endpoints(), (IVec2::new(0, 5), IVec2::new(20, 15)));
    }

    #[test]
    fn test_highlight_survives_translate() {
        let mut canvas = SoftwareCanvas::new(64, 64, WHITE);
        let mut line = line();
        line.draw(&mut canvas);
        line.change_outline(&mut canvas, RED);
        line.translate(&mut canvas, 1, 0).unwrap();
        assert_eq!(canvas.pixel_at(1, 0), Some(RED));

        line.restore_outline(&mut canvas);
        assert_eq!(canvas.pixel_at(1, 0), Some(BLACK));
    }

    #[test]
    fn test_rejects_endpoint_out_of_range() {
        let far = IVec2::new(i32::MIN, 0);
        assert!(matches!(
            LineShape::new(IVec2::ZERO, far, ShapeStyle::default()),
            Err(GeometryError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_is_near() {
        let line = line();
        assert!(line.is_near(IVec2::new(10, 6), 10.0));
        assert!(!line.is_near(IVec2::new(10, 30), 10.0));
    }
}
