//! Snapshot-based undo/redo of transformations

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Drawing, DrawingError, find_polygon_mut};
use crate::canvas::Canvas;
use crate::selection::SelectionSet;
use crate::transform::TransformRequest;
use crate::types::ShapeId;
use crate::vertices::VertexMatrix;

/// Vertices of one polygon captured before it was changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub shape: ShapeId,
    pub snapshot: VertexMatrix,
}

impl Drawing {
    /// Transform every selected shape.
    ///
    /// Every id is resolved and every new vertex computed before anything
    /// is touched, so an invalid request or an out-of-range result changes
    /// nothing. One history entry is pushed per affected polygon, the redo
    /// stack is cleared, and the shapes are highlighted. Returns the number
    /// of polygons transformed.
    pub fn apply_transform(
        &mut self,
        canvas: &mut dyn Canvas,
        selection: &SelectionSet,
        request: &TransformRequest,
    ) -> Result<usize, DrawingError> {
        request.validate()?;

        let mut plans = Vec::with_capacity(selection.len());
        for id in selection.iter() {
            let index = self.node_index(id).ok_or(DrawingError::UnknownShape(id))?;
            plans.push((index, self.nodes[index].plan_transform(request)?));
        }

        let mut transformed = 0;
        for (index, outcomes) in plans {
            let node = &mut self.nodes[index];
            let snapshots: Vec<HistoryEntry> = outcomes
                .iter()
                .filter_map(|(id, _, _)| {
                    node.find_polygon(*id).map(|p| HistoryEntry {
                        shape: *id,
                        snapshot: p.vertices().clone(),
                    })
                })
                .collect();

            node.apply_outcomes(canvas, &outcomes);
            node.change_outline(canvas, self.highlight_color);
            transformed += outcomes.len();

            for entry in snapshots {
                self.push_undo(entry);
            }
        }

        self.redo_stack.clear();
        debug!(
            "Applied transform to {} polygons ({} undo entries)",
            transformed,
            self.undo_stack.len()
        );
        Ok(transformed)
    }

    /// Restore the most recent snapshot. A selected shape keeps its
    /// highlight through the redraw.
    ///
    /// Returns true if an undo was performed, false if no undo available
    pub fn undo_last(&mut self, canvas: &mut dyn Canvas) -> bool {
        let Some(entry) = self.undo_stack.pop() else {
            debug!("Undo: no entries available");
            return false;
        };
        let Some(current) = self.restore(canvas, entry) else {
            return false;
        };
        self.redo_stack.push(current);
        true
    }

    /// Re-apply the most recently undone change.
    ///
    /// Returns true if a redo was performed, false if no redo available
    pub fn redo_last(&mut self, canvas: &mut dyn Canvas) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            debug!("Redo: no entries available");
            return false;
        };
        let Some(current) = self.restore(canvas, entry) else {
            return false;
        };
        self.push_undo(current);
        true
    }

    /// Put a snapshot back, returning the vertices it replaced
    fn restore(&mut self, canvas: &mut dyn Canvas, entry: HistoryEntry) -> Option<HistoryEntry> {
        let Some(polygon) = find_polygon_mut(&mut self.nodes, entry.shape) else {
            warn!("History entry for missing shape {}", entry.shape);
            return None;
        };
        let current = HistoryEntry {
            shape: entry.shape,
            snapshot: polygon.vertices().clone(),
        };
        polygon.set_vertices(canvas, entry.snapshot);
        debug!("Restored snapshot of {}", entry.shape);
        Some(current)
    }

    pub(crate) fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
        while self.undo_stack.len() > self.max_undo_levels {
            self.undo_stack.remove(0);
        }
    }

    /// Drop every history entry referring to `ids`
    pub(crate) fn purge_history(&mut self, ids: &[ShapeId]) {
        self.undo_stack.retain(|e| !ids.contains(&e.shape));
        self.redo_stack.retain(|e| !ids.contains(&e.shape));
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Forget all undo and redo entries
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
