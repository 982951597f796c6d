//! Selection-driven editing of the drawing

use tracing::{debug, info};

use super::{Drawing, DrawingError};
use crate::canvas::Canvas;
use crate::group::{CompositeGroup, DrawableNode};
use crate::selection::SelectionSet;
use crate::types::{Color, Point, ShapeId};

impl Drawing {
    /// Handle a click at a math-space point.
    ///
    /// Without `extend` the previous selection is cleared first. The first
    /// top-level node hit has its membership toggled. Returns the id hit.
    pub fn select_at(
        &mut self,
        canvas: &mut dyn Canvas,
        point: Point,
        extend: bool,
        selection: &mut SelectionSet,
    ) -> Option<ShapeId> {
        if !extend {
            self.deselect_all(canvas, selection);
        }

        let threshold = self.hit_distance;
        let index = self
            .nodes
            .iter()
            .position(|n| n.hit_test(point, threshold))?;
        let node = &mut self.nodes[index];
        let id = node.id();

        if selection.toggle(id) {
            node.change_outline(canvas, self.highlight_color);
            debug!("Selected {}", id);
        } else {
            node.restore_outline(canvas);
            debug!("Deselected {}", id);
        }
        Some(id)
    }

    /// Restore every selected outline and empty the selection
    pub fn deselect_all(&mut self, canvas: &mut dyn Canvas, selection: &mut SelectionSet) {
        for id in selection.take() {
            if let Some(index) = self.node_index(id) {
                self.nodes[index].restore_outline(canvas);
            }
        }
    }

    /// Move the selected top-level nodes into a new group.
    ///
    /// Members keep their drawing order and the group takes the place of
    /// the lowest one. The selection becomes the new group. Needs at least
    /// two selected nodes.
    pub fn group(
        &mut self,
        canvas: &mut dyn Canvas,
        selection: &mut SelectionSet,
    ) -> Option<ShapeId> {
        let chosen: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| selection.contains(n.id()))
            .map(|(i, _)| i)
            .collect();
        let &first = chosen.first()?;
        if chosen.len() < 2 {
            debug!("Group: need at least two shapes, got {}", chosen.len());
            return None;
        }

        let mut members = Vec::with_capacity(chosen.len());
        for &index in chosen.iter().rev() {
            members.push(self.nodes.remove(index));
        }
        members.reverse();

        let mut group = DrawableNode::Group(CompositeGroup::with_members(members));
        group.change_outline(canvas, self.highlight_color);
        let id = group.id();
        self.nodes.insert(first, group);

        selection.clear();
        selection.insert(id);
        info!("Grouped {} shapes into {}", chosen.len(), id);
        Some(id)
    }

    /// Dissolve every selected group in place.
    ///
    /// The former members replace the group in the selection. Returns the
    /// number of groups dissolved.
    pub fn ungroup(&mut self, canvas: &mut dyn Canvas, selection: &mut SelectionSet) -> usize {
        let mut dissolved = 0;
        for id in selection.take() {
            let Some(index) = self.node_index(id) else {
                continue;
            };
            if !matches!(self.nodes[index], DrawableNode::Group(_)) {
                selection.insert(id);
                continue;
            }
            let DrawableNode::Group(group) = self.nodes.remove(index) else {
                continue;
            };

            let members = group.ungroup();
            debug!("Ungrouped {} into {} shapes", id, members.len());
            for (offset, mut member) in members.into_iter().enumerate() {
                member.change_outline(canvas, self.highlight_color);
                selection.insert(member.id());
                self.nodes.insert(index + offset, member);
            }
            dissolved += 1;
        }
        dissolved
    }

    /// Recolor every selected shape. Returns the number recolored.
    pub fn change_color(
        &mut self,
        canvas: &mut dyn Canvas,
        selection: &SelectionSet,
        color: Color,
    ) -> usize {
        let mut changed = 0;
        for id in selection.iter() {
            let Some(index) = self.node_index(id) else {
                continue;
            };
            let node = &mut self.nodes[index];
            node.change_color(canvas, color);
            node.change_outline(canvas, self.highlight_color);
            changed += 1;
        }
        changed
    }

    /// Erase and remove every selected shape, purging their history.
    /// Returns the number of top-level shapes removed.
    pub fn delete(&mut self, canvas: &mut dyn Canvas, selection: &mut SelectionSet) -> usize {
        let mut deleted = 0;
        for id in selection.take() {
            if self.remove(canvas, id).is_ok() {
                deleted += 1;
            }
        }
        info!("Deleted {} shapes", deleted);
        deleted
    }

    /// Erase and detach a top-level node, purging its history
    pub fn remove(
        &mut self,
        canvas: &mut dyn Canvas,
        id: ShapeId,
    ) -> Result<DrawableNode, DrawingError> {
        let index = self.node_index(id).ok_or(DrawingError::UnknownShape(id))?;
        let mut node = self.nodes.remove(index);
        node.erase(canvas);
        self.purge_history(&node.polygon_ids());
        debug!("Removed {}", id);
        Ok(node)
    }

    /// Erase every shape and forget all history
    pub fn clear(&mut self, canvas: &mut dyn Canvas) {
        for node in &mut self.nodes {
            node.erase(canvas);
        }
        info!("Cleared drawing ({} shapes)", self.nodes.len());
        self.nodes.clear();
        self.clear_history();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Primitive, SoftwareCanvas};
    use crate::constants::{BLACK, BLUE, WHITE};
    use crate::transform::TransformRequest;
    use glam::IVec2;

    fn canvas() -> SoftwareCanvas {
        SoftwareCanvas::new(256, 256, WHITE)
    }

    fn square(drawing: &mut Drawing, canvas: &mut SoftwareCanvas, x: i32, y: i32) -> ShapeId {
        drawing
            .add_polygon(
                canvas,
                vec![
                    IVec2::new(x, y),
                    IVec2::new(x + 10, y),
                    IVec2::new(x + 10, y + 10),
                    IVec2::new(x, y + 10),
                ],
            )
            .unwrap()
    }

    fn outline_of(canvas: &SoftwareCanvas, drawing: &Drawing, id: ShapeId) -> Color {
        let handle = drawing.polygon(id).unwrap().contour_handles()[0];
        match canvas.primitive(handle) {
            Some(Primitive::Rect { outline, .. }) => *outline,
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn test_select_at_toggles_and_highlights() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let a = square(&mut drawing, &mut canvas, 0, 0);
        let mut selection = SelectionSet::new();

        assert_eq!(
            drawing.select_at(&mut canvas, IVec2::new(5, 5), true, &mut selection),
            Some(a)
        );
        assert!(selection.contains(a));
        assert_eq!(outline_of(&canvas, &drawing, a), drawing.highlight_color());

        drawing.select_at(&mut canvas, IVec2::new(5, 5), true, &mut selection);
        assert!(selection.is_empty());
        assert_eq!(outline_of(&canvas, &drawing, a), BLACK);
    }

    #[test]
    fn test_select_without_extend_replaces() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let a = square(&mut drawing, &mut canvas, 0, 0);
        let b = square(&mut drawing, &mut canvas, 40, 0);
        let mut selection = SelectionSet::new();

        drawing.select_at(&mut canvas, IVec2::new(5, 5), false, &mut selection);
        drawing.select_at(&mut canvas, IVec2::new(45, 5), false, &mut selection);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![b]);
        assert_eq!(outline_of(&canvas, &drawing, a), BLACK);

        // A miss clears the selection
        assert_eq!(
            drawing.select_at(&mut canvas, IVec2::new(-80, -80), false, &mut selection),
            None
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn test_first_hit_wins() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let a = square(&mut drawing, &mut canvas, 0, 0);
        square(&mut drawing, &mut canvas, 5, 5);
        let mut selection = SelectionSet::new();

        assert_eq!(
            drawing.select_at(&mut canvas, IVec2::new(7, 7), false, &mut selection),
            Some(a)
        );
    }

    #[test]
    fn test_group_and_ungroup() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let a = square(&mut drawing, &mut canvas, 0, 0);
        let b = square(&mut drawing, &mut canvas, 40, 0);
        let c = square(&mut drawing, &mut canvas, 80, 0);
        let mut selection = SelectionSet::new();
        selection.insert(c);
        selection.insert(a);

        let group = drawing.group(&mut canvas, &mut selection).unwrap();
        assert_eq!(drawing.len(), 2);
        assert_eq!(drawing.nodes()[0].id(), group);
        assert_eq!(drawing.nodes()[1].id(), b);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![group]);
        match drawing.node(group) {
            Some(DrawableNode::Group(g)) => {
                let ids: Vec<_> = g.members().iter().map(|m| m.id()).collect();
                assert_eq!(ids, vec![a, c]);
            }
            other => panic!("expected group, got {:?}", other),
        }

        // Clicking any member selects the group
        drawing.deselect_all(&mut canvas, &mut selection);
        assert_eq!(
            drawing.select_at(&mut canvas, IVec2::new(85, 5), false, &mut selection),
            Some(group)
        );

        assert_eq!(drawing.ungroup(&mut canvas, &mut selection), 1);
        assert_eq!(drawing.len(), 3);
        let ids: Vec<_> = drawing.nodes().iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec![a, c, b]);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn test_group_needs_two() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let a = square(&mut drawing, &mut canvas, 0, 0);
        let mut selection = SelectionSet::new();
        assert!(drawing.group(&mut canvas, &mut selection).is_none());

        selection.insert(a);
        assert!(drawing.group(&mut canvas, &mut selection).is_none());
        assert_eq!(drawing.len(), 1);
    }

    #[test]
    fn test_ungroup_keeps_plain_shapes_selected() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let a = square(&mut drawing, &mut canvas, 0, 0);
        let mut selection = SelectionSet::new();
        selection.insert(a);
        assert_eq!(drawing.ungroup(&mut canvas, &mut selection), 0);
        assert!(selection.contains(a));
    }

    #[test]
    fn test_change_color_keeps_highlight() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let a = square(&mut drawing, &mut canvas, 0, 0);
        let mut selection = SelectionSet::new();
        selection.insert(a);

        assert_eq!(drawing.change_color(&mut canvas, &selection, BLUE), 1);
        assert_eq!(drawing.polygon(a).unwrap().color(), BLUE);
        assert_eq!(outline_of(&canvas, &drawing, a), drawing.highlight_color());
        // Interior fill picks up the new color
        assert_eq!(canvas.pixel_at(5, -5), Some(BLUE));
    }

    #[test]
    fn test_delete_purges_history() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let a = square(&mut drawing, &mut canvas, 0, 0);
        let b = square(&mut drawing, &mut canvas, 40, 0);
        let mut selection = SelectionSet::new();
        selection.insert(a);
        selection.insert(b);
        let request = TransformRequest::default().with_translate(1, 0);
        drawing.apply_transform(&mut canvas, &selection, &request).unwrap();
        assert_eq!(drawing.undo_count(), 2);

        selection.clear();
        selection.insert(a);
        assert_eq!(drawing.delete(&mut canvas, &mut selection), 1);
        assert!(selection.is_empty());
        assert!(drawing.polygon(a).is_none());
        assert_eq!(drawing.undo_count(), 1);

        assert!(drawing.undo_last(&mut canvas));
        assert_eq!(drawing.polygon(b).unwrap().vertices().point(0), Some(IVec2::new(40, 0)));
    }

    #[test]
    fn test_delete_group_purges_members() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        square(&mut drawing, &mut canvas, 0, 0);
        square(&mut drawing, &mut canvas, 40, 0);
        let mut selection = SelectionSet::new();
        for node in drawing.nodes() {
            selection.insert(node.id());
        }
        drawing.group(&mut canvas, &mut selection).unwrap();
        let request = TransformRequest::default().with_translate(0, 3);
        drawing.apply_transform(&mut canvas, &selection, &request).unwrap();
        assert_eq!(drawing.undo_count(), 2);

        drawing.delete(&mut canvas, &mut selection);
        assert!(drawing.is_empty());
        assert_eq!(drawing.undo_count(), 0);
        assert_eq!(canvas.primitive_count(), 0);
    }

    #[test]
    fn test_remove_unknown() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        assert!(matches!(
            drawing.remove(&mut canvas, ShapeId(u64::MAX)),
            Err(DrawingError::UnknownShape(_))
        ));
    }

    #[test]
    fn test_clear() {
        let mut canvas = canvas();
        let mut drawing = Drawing::new();
        let a = square(&mut drawing, &mut canvas, 0, 0);
        let mut selection = SelectionSet::new();
        selection.insert(a);
        let request = TransformRequest::default().with_translate(2, 2);
        drawing.apply_transform(&mut canvas, &selection, &request).unwrap();

        drawing.clear(&mut canvas);
        assert!(drawing.is_empty());
        assert!(!drawing.can_undo());
        assert_eq!(canvas.primitive_count(), 0);
        assert_eq!(canvas.pixel_at(5, -5), Some(WHITE));
    }
}
