//! Drawing scene
//!
//! [`Drawing`] owns the top-level shapes and the transformation history
//! and exposes the editing operations a host UI drives: creating shapes,
//! selecting, grouping, recoloring, deleting, transforming with undo/redo
//! and capturing animation frames. Selection state lives outside, in a
//! [`SelectionSet`](crate::selection::SelectionSet) passed to each call.

mod editing;
mod frames;
mod history;

pub use frames::{Frame, FrameSequence};
pub use history::HistoryEntry;

use polydraw_config::DrawingConfig;
use thiserror::Error;
use tracing::debug;

use crate::canvas::Canvas;
use crate::group::DrawableNode;
use crate::line::LineShape;
use crate::polygon::{Polygon, ShapeStyle};
use crate::transform::TransformError;
use crate::types::{Color, Point, ShapeId};
use crate::validation::{GeometryError, snap_to_brush_grid};
use crate::vertices::VertexMatrix;

#[derive(Debug, Error, PartialEq)]
pub enum DrawingError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("Unknown shape: {0}")]
    UnknownShape(ShapeId),
}

/// Top-level shapes plus undo/redo history
pub struct Drawing {
    pub(crate) nodes: Vec<DrawableNode>,
    /// Undo stack (most recent at end)
    pub(crate) undo_stack: Vec<HistoryEntry>,
    pub(crate) redo_stack: Vec<HistoryEntry>,
    pub(crate) max_undo_levels: usize,
    /// Style given to newly created shapes
    pub(crate) style: ShapeStyle,
    pub(crate) highlight_color: Color,
    pub(crate) hit_distance: f64,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawing {
    pub fn new() -> Self {
        Self::with_config(&DrawingConfig::default())
    }

    pub fn with_config(config: &DrawingConfig) -> Self {
        Self {
            nodes: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_levels: config.history.max_undo_levels,
            style: ShapeStyle::from_config(&config.brush),
            highlight_color: config.selection.highlight_color,
            hit_distance: config.selection.hit_distance,
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    /// Style used for shapes created from now on
    pub fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
    }

    pub fn highlight_color(&self) -> Color {
        self.highlight_color
    }

    /// Create a polygon with the current style, draw it and add it on top
    pub fn add_polygon(
        &mut self,
        canvas: &mut dyn Canvas,
        points: Vec<Point>,
    ) -> Result<ShapeId, DrawingError> {
        let polygon = Polygon::new(VertexMatrix::new(points)?, self.style)?;
        Ok(self.add_node(canvas, polygon))
    }

    /// Build a polygon from raw canvas clicks.
    ///
    /// Each point is snapped to the centre of its brush cell and flipped to
    /// math space before the polygon is created.
    pub fn create_polygon_from_canvas_points(
        &mut self,
        canvas: &mut dyn Canvas,
        canvas_points: &[Point],
    ) -> Result<ShapeId, DrawingError> {
        let brush = self.style.brush_size;
        let points = canvas_points
            .iter()
            .map(|p| snap_to_brush_grid(*p, brush))
            .collect();
        self.add_polygon(canvas, points)
    }

    pub fn add_line(
        &mut self,
        canvas: &mut dyn Canvas,
        start: Point,
        end: Point,
    ) -> Result<ShapeId, DrawingError> {
        let line = LineShape::new(start, end, self.style)?;
        Ok(self.add_node(canvas, line))
    }

    /// Draw a node and add it on top of the drawing
    pub fn add_node(&mut self, canvas: &mut dyn Canvas, node: impl Into<DrawableNode>) -> ShapeId {
        let mut node = node.into();
        node.draw(canvas);
        let id = node.id();
        debug!("Added {} ({} top-level shapes)", id, self.nodes.len() + 1);
        self.nodes.push(node);
        id
    }

    /// Top-level node by id
    pub fn node(&self, id: ShapeId) -> Option<&DrawableNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Any polygon by id, including group members
    pub fn polygon(&self, id: ShapeId) -> Option<&Polygon> {
        self.nodes.iter().find_map(|n| n.find_polygon(id))
    }

    pub fn nodes(&self) -> &[DrawableNode] {
        &self.nodes
    }

    /// Number of top-level nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Redraw every shape in order
    pub fn draw_all(&mut self, canvas: &mut dyn Canvas) {
        for node in &mut self.nodes {
            node.draw(canvas);
        }
    }

    pub(crate) fn node_index(&self, id: ShapeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id() == id)
    }
}

/// Polygon lookup that only borrows the node list, so history stacks stay usable
pub(crate) fn find_polygon_mut(nodes: &mut [DrawableNode], id: ShapeId) -> Option<&mut Polygon> {
    nodes.iter_mut().find_map(|n| n.find_polygon_mut(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SoftwareCanvas;
    use crate::constants::{BLACK, WHITE};
    use glam::IVec2;

    fn canvas() -> SoftwareCanvas {
        SoftwareCanvas::new(128, 128, WHITE)
    }

    #[test]
    fn test_add_polygon_draws() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let id = drawing
            .add_polygon(
                &mut canvas,
                vec![IVec2::new(0, 0), IVec2::new(10, 0), IVec2::new(10, 10)],
            )
            .unwrap();

        assert_eq!(drawing.len(), 1);
        assert!(drawing.polygon(id).unwrap().is_drawn());
        assert!(drawing.node(id).is_some());
        assert_eq!(canvas.pixel_at(0, 0), Some(BLACK));
    }

    #[test]
    fn test_add_polygon_rejects_two_points() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let result = drawing.add_polygon(&mut canvas, vec![IVec2::ZERO, IVec2::ONE]);
        assert_eq!(
            result,
            Err(DrawingError::Geometry(GeometryError::InvalidGeometry { count: 2 }))
        );
        assert!(drawing.is_empty());
        assert_eq!(canvas.primitive_count(), 0);
    }

    #[test]
    fn test_create_from_canvas_points_snaps_and_flips() {
        let mut canvas = canvas();
        let mut config = DrawingConfig::default();
        config.brush.size = 4;
        let mut drawing = Drawing::with_config(&config);

        let id = drawing
            .create_polygon_from_canvas_points(
                &mut canvas,
                &[IVec2::new(1, 1), IVec2::new(9, 1), IVec2::new(9, -7)],
            )
            .unwrap();

        let vertices = drawing.polygon(id).unwrap().vertices().points().to_vec();
        assert_eq!(
            vertices,
            vec![IVec2::new(2, -2), IVec2::new(10, -2), IVec2::new(10, 6)]
        );
    }

    #[test]
    fn test_extreme_canvas_points_are_rejected() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let result = drawing.create_polygon_from_canvas_points(
            &mut canvas,
            &[IVec2::new(0, 0), IVec2::new(5, 0), IVec2::new(0, i32::MIN)],
        );
        assert!(matches!(
            result,
            Err(DrawingError::Geometry(GeometryError::CoordinateOutOfRange { .. }))
        ));
        assert!(drawing.is_empty());
        assert_eq!(canvas.primitive_count(), 0);
    }

    #[test]
    fn test_add_line() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let id = drawing
            .add_line(&mut canvas, IVec2::new(-5, 0), IVec2::new(5, 0))
            .unwrap();
        assert!(matches!(drawing.node(id), Some(DrawableNode::Line(_))));
        assert!(drawing.polygon(id).is_none());
    }

    #[test]
    fn test_draw_all_does_not_duplicate() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        drawing
            .add_polygon(
                &mut canvas,
                vec![IVec2::new(0, 0), IVec2::new(10, 0), IVec2::new(10, 10)],
            )
            .unwrap();
        let count = canvas.primitive_count();

        drawing.draw_all(&mut canvas);
        assert_eq!(canvas.primitive_count(), count);
    }
}
