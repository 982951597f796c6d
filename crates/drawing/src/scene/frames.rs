//! Animation frames: snapshots of every polygon's vertices

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Drawing, find_polygon_mut};
use crate::canvas::Canvas;
use crate::types::ShapeId;
use crate::vertices::VertexMatrix;

/// Vertices of every polygon at one moment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    shapes: BTreeMap<ShapeId, VertexMatrix>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ShapeId, vertices: VertexMatrix) {
        self.shapes.insert(id, vertices);
    }

    pub fn get(&self, id: ShapeId) -> Option<&VertexMatrix> {
        self.shapes.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &VertexMatrix)> {
        self.shapes.iter().map(|(id, v)| (*id, v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Ordered list of captured frames
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame, returning its index
    pub fn push(&mut self, frame: Frame) -> usize {
        self.frames.push(frame);
        self.frames.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Drawing {
    /// Snapshot the vertices of every polygon, group members included
    pub fn capture_frame(&self) -> Frame {
        let mut frame = Frame::new();
        for node in &self.nodes {
            for id in node.polygon_ids() {
                if let Some(polygon) = node.find_polygon(id) {
                    frame.insert(id, polygon.vertices().clone());
                }
            }
        }
        debug!("Captured frame of {} polygons", frame.len());
        frame
    }

    /// Move polygons to the vertices stored in `frame`.
    ///
    /// Playback does not touch the undo history. Polygons missing from the
    /// frame stay where they are; frame entries for deleted polygons are
    /// skipped. Returns the number of polygons updated.
    pub fn show_frame(&mut self, canvas: &mut dyn Canvas, frame: &Frame) -> usize {
        let mut shown = 0;
        for (id, vertices) in frame.iter() {
            match find_polygon_mut(&mut self.nodes, id) {
                Some(polygon) => {
                    if polygon.vertices() != vertices {
                        polygon.set_vertices(canvas, vertices.clone());
                    }
                    shown += 1;
                }
                None => warn!("Frame references missing shape {}", id),
            }
        }
        shown
    }
}
