//! Composite shapes
//!
//! A drawing is a list of [`DrawableNode`]s. Groups own their members, so
//! a group can never end up containing itself.

use tracing::debug;

use crate::canvas::Canvas;
use crate::line::LineShape;
use crate::polygon::Polygon;
use crate::transform::{TransformError, TransformRequest, TransformationRecord};
use crate::types::{Color, Point, ShapeId};
use crate::vertices::VertexMatrix;

/// Outcome of transforming one polygon inside a node
pub type TransformOutcome = (ShapeId, TransformationRecord, VertexMatrix);

/// Anything that can live in a drawing
#[derive(Debug)]
pub enum DrawableNode {
    Polygon(Polygon),
    Line(LineShape),
    Group(CompositeGroup),
}

impl DrawableNode {
    pub fn id(&self) -> ShapeId {
        match self {
            DrawableNode::Polygon(p) => p.id(),
            DrawableNode::Line(l) => l.id(),
            DrawableNode::Group(g) => g.id(),
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        match self {
            DrawableNode::Polygon(p) => p.draw(canvas),
            DrawableNode::Line(l) => l.draw(canvas),
            DrawableNode::Group(g) => g.draw(canvas),
        }
    }

    /// Returns true if anything was erased
    pub fn erase(&mut self, canvas: &mut dyn Canvas) -> bool {
        match self {
            DrawableNode::Polygon(p) => p.erase(canvas),
            DrawableNode::Line(l) => l.erase(canvas),
            DrawableNode::Group(g) => g.erase(canvas),
        }
    }

    pub fn change_color(&mut self, canvas: &mut dyn Canvas, color: Color) {
        match self {
            DrawableNode::Polygon(p) => p.change_color(canvas, color),
            DrawableNode::Line(l) => l.change_color(canvas, color),
            DrawableNode::Group(g) => g.change_color(canvas, color),
        }
    }

    pub fn change_outline(&mut self, canvas: &mut dyn Canvas, color: Color) {
        match self {
            DrawableNode::Polygon(p) => p.change_outline(canvas, color),
            DrawableNode::Line(l) => l.change_outline(canvas, color),
            DrawableNode::Group(g) => g.change_outline(canvas, color),
        }
    }

    /// Put every outline back to its shape's own color
    pub fn restore_outline(&mut self, canvas: &mut dyn Canvas) {
        match self {
            DrawableNode::Polygon(p) => p.restore_outline(canvas),
            DrawableNode::Line(l) => l.restore_outline(canvas),
            DrawableNode::Group(g) => g.restore_outline(canvas),
        }
    }

    /// Polygons contain the point, lines are within `threshold` of it,
    /// groups have any member hit
    pub fn hit_test(&self, point: Point, threshold: f64) -> bool {
        match self {
            DrawableNode::Polygon(p) => p.contains_point(point),
            DrawableNode::Line(l) => l.is_near(point, threshold),
            DrawableNode::Group(g) => g.hit_test(point, threshold),
        }
    }

    /// Transform every polygon in this node.
    ///
    /// All new vertices are computed before anything is redrawn, so either
    /// every polygon moves or none does. Lines are left in place.
    pub fn transform(
        &mut self,
        canvas: &mut dyn Canvas,
        request: &TransformRequest,
    ) -> Result<Vec<TransformOutcome>, TransformError> {
        let outcomes = self.plan_transform(request)?;
        self.apply_outcomes(canvas, &outcomes);
        Ok(outcomes)
    }

    /// Compute the outcome for every polygon without touching the canvas
    pub fn plan_transform(
        &self,
        request: &TransformRequest,
    ) -> Result<Vec<TransformOutcome>, TransformError> {
        request.validate()?;
        let mut outcomes = Vec::new();
        self.plan_into(request, &mut outcomes)?;
        Ok(outcomes)
    }

    fn plan_into(
        &self,
        request: &TransformRequest,
        outcomes: &mut Vec<TransformOutcome>,
    ) -> Result<(), TransformError> {
        match self {
            DrawableNode::Polygon(p) => {
                let (record, vertices) = p.plan_transform(request)?;
                outcomes.push((p.id(), record, vertices));
            }
            DrawableNode::Line(l) => {
                debug!("Skipping transform of line {}", l.id());
            }
            DrawableNode::Group(g) => {
                for member in &g.members {
                    member.plan_into(request, outcomes)?;
                }
            }
        }
        Ok(())
    }

    /// Move each planned polygon to its new vertices and redraw it
    pub fn apply_outcomes(&mut self, canvas: &mut dyn Canvas, outcomes: &[TransformOutcome]) {
        for (id, _, vertices) in outcomes {
            if let Some(polygon) = self.find_polygon_mut(*id) {
                polygon.set_vertices(canvas, vertices.clone());
            }
        }
    }

    /// Ids of every polygon in this node, depth first
    pub fn polygon_ids(&self) -> Vec<ShapeId> {
        let mut ids = Vec::new();
        self.collect_polygon_ids(&mut ids);
        ids
    }

    fn collect_polygon_ids(&self, ids: &mut Vec<ShapeId>) {
        match self {
            DrawableNode::Polygon(p) => ids.push(p.id()),
            DrawableNode::Line(_) => {}
            DrawableNode::Group(g) => {
                for member in &g.members {
                    member.collect_polygon_ids(ids);
                }
            }
        }
    }

    pub fn find_polygon(&self, id: ShapeId) -> Option<&Polygon> {
        match self {
            DrawableNode::Polygon(p) if p.id() == id => Some(p),
            DrawableNode::Group(g) => g.members.iter().find_map(|m| m.find_polygon(id)),
            _ => None,
        }
    }

    pub fn find_polygon_mut(&mut self, id: ShapeId) -> Option<&mut Polygon> {
        match self {
            DrawableNode::Polygon(p) if p.id() == id => Some(p),
            DrawableNode::Group(g) => g
                .members
                .iter_mut()
                .find_map(|m| m.find_polygon_mut(id)),
            _ => None,
        }
    }

    /// Whether this node is, or contains, the shape `id`
    pub fn contains_id(&self, id: ShapeId) -> bool {
        self.id() == id
            || matches!(self, DrawableNode::Group(g) if g.members.iter().any(|m| m.contains_id(id)))
    }
}

impl From<Polygon> for DrawableNode {
    fn from(polygon: Polygon) -> Self {
        DrawableNode::Polygon(polygon)
    }
}

impl From<LineShape> for DrawableNode {
    fn from(line: LineShape) -> Self {
        DrawableNode::Line(line)
    }
}

impl From<CompositeGroup> for DrawableNode {
    fn from(group: CompositeGroup) -> Self {
        DrawableNode::Group(group)
    }
}

/// Ordered collection of nodes treated as one shape
#[derive(Debug)]
pub struct CompositeGroup {
    id: ShapeId,
    members: Vec<DrawableNode>,
}

impl Default for CompositeGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeGroup {
    pub fn new() -> Self {
        Self {
            id: ShapeId::next(),
            members: Vec::new(),
        }
    }

    pub fn with_members(members: Vec<DrawableNode>) -> Self {
        Self {
            id: ShapeId::next(),
            members,
        }
    }

    #[inline]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn add(&mut self, node: impl Into<DrawableNode>) {
        self.members.push(node.into());
    }

    /// Erase and detach the direct member `id`
    pub fn remove(&mut self, canvas: &mut dyn Canvas, id: ShapeId) -> Option<DrawableNode> {
        let index = self.members.iter().position(|m| m.id() == id)?;
        let mut node = self.members.remove(index);
        node.erase(canvas);
        Some(node)
    }

    pub fn members(&self) -> &[DrawableNode] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Dissolve the group, handing back its members
    pub fn ungroup(self) -> Vec<DrawableNode> {
        self.members
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        for member in &mut self.members {
            member.draw(canvas);
        }
    }

    pub fn erase(&mut self, canvas: &mut dyn Canvas) -> bool {
        let mut erased = false;
        for member in &mut self.members {
            erased |= member.erase(canvas);
        }
        erased
    }

    pub fn change_color(&mut self, canvas: &mut dyn Canvas, color: Color) {
        for member in &mut self.members {
            member.change_color(canvas, color);
        }
    }

    pub fn change_outline(&mut self, canvas: &mut dyn Canvas, color: Color) {
        for member in &mut self.members {
            member.change_outline(canvas, color);
        }
    }

    pub fn restore_outline(&mut self, canvas: &mut dyn Canvas) {
        for member in &mut self.members {
            member.restore_outline(canvas);
        }
    }

    pub fn hit_test(&self, point: Point, threshold: f64) -> bool {
        self.members.iter().any(|m| m.hit_test(point, threshold))
    }
}
