//! Polygon entity: owns its vertices and the canvas handles it drew

mod fill;

use glam::{DVec2, IVec2};
use polydraw_config::BrushConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canvas::Canvas;
use crate::constants::{BLACK, DEFAULT_BRUSH_SIZE};
use crate::raster::{RasterLine, RasterStrategy};
use crate::selection::point_in_polygon;
use crate::transform::{TransformError, TransformRequest, TransformationRecord};
use crate::types::{Color, Point, PrimitiveHandle, ShapeId};
use crate::validation::{GeometryError, flip_y, validate_brush_size};
use crate::vertices::VertexMatrix;

/// Appearance shared by polygons and lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub color: Color,
    pub brush_size: i32,
    pub strategy: RasterStrategy,
    /// Scanline-fill the interior (polygons only)
    pub filled: bool,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: BLACK,
            brush_size: DEFAULT_BRUSH_SIZE,
            strategy: RasterStrategy::default(),
            filled: true,
        }
    }
}

impl ShapeStyle {
    pub fn from_config(brush: &BrushConfig) -> Self {
        Self {
            color: brush.color,
            brush_size: brush.size,
            strategy: brush.algorithm.into(),
            filled: brush.fill,
        }
    }
}

/// A closed polygon in math space (Y grows upward).
///
/// Drawing converts vertices to canvas space by negating Y. The polygon
/// counts as drawn exactly when it holds contour handles. A highlight set
/// with [`change_outline`](Self::change_outline) survives redraws until
/// [`restore_outline`](Self::restore_outline).
#[derive(Debug)]
pub struct Polygon {
    id: ShapeId,
    vertices: VertexMatrix,
    style: ShapeStyle,
    outline: Option<Color>,
    contour_handles: Vec<PrimitiveHandle>,
    fill_handles: Vec<PrimitiveHandle>,
}

impl Polygon {
    pub fn new(vertices: VertexMatrix, style: ShapeStyle) -> Result<Self, GeometryError> {
        validate_brush_size(style.brush_size)?;
        Ok(Self {
            id: ShapeId::next(),
            vertices,
            style,
            outline: None,
            contour_handles: Vec::new(),
            fill_handles: Vec::new(),
        })
    }

    pub fn from_points(points: Vec<Point>, style: ShapeStyle) -> Result<Self, GeometryError> {
        Self::new(VertexMatrix::new(points)?, style)
    }

    #[inline]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[inline]
    pub fn vertices(&self) -> &VertexMatrix {
        &self.vertices
    }

    #[inline]
    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.style.color
    }

    /// Highlight color currently applied to the contour, if any
    #[inline]
    pub fn outline(&self) -> Option<Color> {
        self.outline
    }

    #[inline]
    pub fn is_drawn(&self) -> bool {
        !self.contour_handles.is_empty()
    }

    pub fn contour_handles(&self) -> &[PrimitiveHandle] {
        &self.contour_handles
    }

    pub fn fill_handles(&self) -> &[PrimitiveHandle] {
        &self.fill_handles
    }

    /// Draw contour and (if enabled) fill, replacing any previous drawing
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.erase(canvas);
        self.contour_handles = self.draw_contour(canvas);
        self.fill_handles = if self.style.filled {
            self.fill_interior(canvas)
        } else {
            Vec::new()
        };
        if let Some(outline) = self.outline {
            self.paint_outline(canvas, outline);
        }
    }

    /// Rasterize every edge with the polygon's strategy
    pub fn draw_contour(&self, canvas: &mut dyn Canvas) -> Vec<PrimitiveHandle> {
        let mut handles = Vec::new();
        for (from, to) in self.vertices.edges() {
            let output = self.style.strategy.draw(
                canvas,
                self.style.color,
                self.style.brush_size,
                flip_y(from),
                flip_y(to),
            );
            handles.extend(output.handles);
        }
        handles
    }

    /// Remove everything this polygon drew. Returns false if nothing was drawn.
    pub fn erase(&mut self, canvas: &mut dyn Canvas) -> bool {
        if self.contour_handles.is_empty() {
            return false;
        }
        for handle in self.contour_handles.drain(..).chain(self.fill_handles.drain(..)) {
            canvas.erase(handle);
        }
        true
    }

    /// Recolor contour and fill
    pub fn change_color(&mut self, canvas: &mut dyn Canvas, color: Color) {
        self.style.color = color;
        for handle in self.contour_handles.iter().chain(&self.fill_handles) {
            canvas.recolor(*handle, color);
        }
        if let Some(outline) = self.outline {
            self.paint_outline(canvas, outline);
        }
    }

    /// Recolor only the outline of the contour cells (selection highlight)
    pub fn change_outline(&mut self, canvas: &mut dyn Canvas, color: Color) {
        self.outline = Some(color);
        self.paint_outline(canvas, color);
    }

    /// Put the outline back to the polygon's own color
    pub fn restore_outline(&mut self, canvas: &mut dyn Canvas) {
        self.outline = None;
        self.paint_outline(canvas, self.style.color);
    }

    fn paint_outline(&self, canvas: &mut dyn Canvas, color: Color) {
        for handle in &self.contour_handles {
            canvas.set_outline(*handle, color);
        }
    }

    pub fn centroid(&self) -> DVec2 {
        self.vertices.centroid()
    }

    /// Even-odd containment test for a math-space point
    pub fn contains_point(&self, point: Point) -> bool {
        point_in_polygon(point, self.vertices.points())
    }

    /// Compute where a transformation would move the vertices without
    /// touching the canvas
    pub fn plan_transform(
        &self,
        request: &TransformRequest,
    ) -> Result<(TransformationRecord, VertexMatrix), TransformError> {
        let record = TransformationRecord::for_vertices(request, &self.vertices)?;
        let transformed = record.transform(&self.vertices)?;
        Ok((record, transformed))
    }

    /// Apply a transformation pivoted on the current centroid.
    ///
    /// The new vertices are computed before anything is erased, so an
    /// invalid request or an out-of-range result leaves the polygon
    /// untouched.
    pub fn transform(
        &mut self,
        canvas: &mut dyn Canvas,
        request: &TransformRequest,
    ) -> Result<(TransformationRecord, VertexMatrix), TransformError> {
        let (record, transformed) = self.plan_transform(request)?;
        debug!(
            "Transforming {} around ({:.2}, {:.2})",
            self.id, record.pivot.x, record.pivot.y
        );
        self.set_vertices(canvas, transformed.clone());
        Ok((record, transformed))
    }

    /// Replace the vertices and redraw
    pub fn set_vertices(&mut self, canvas: &mut dyn Canvas, vertices: VertexMatrix) {
        self.erase(canvas);
        self.vertices = vertices;
        self.draw(canvas);
    }

    /// Move by an integer offset and redraw
    pub fn translate(
        &mut self,
        canvas: &mut dyn Canvas,
        dx: i32,
        dy: i32,
    ) -> Result<(), GeometryError> {
        let moved = self.vertices.translated(IVec2::new(dx, dy))?;
        self.set_vertices(canvas, moved);
        Ok(())
    }
}
