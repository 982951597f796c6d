use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer point on the pixel grid
pub type Point = IVec2;

/// RGBA color, same layout as the surface pixels
pub type Color = [f32; 4];

/// Opaque reference to a primitive drawn on a canvas.
///
/// Handles are issued by the canvas and must be passed back verbatim to
/// erase or recolor the primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrimitiveHandle(pub u64);

impl fmt::Display for PrimitiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static NEXT_SHAPE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a polygon, line or group.
///
/// Unique within the process; used by selection sets and history entries
/// to refer to shapes without borrowing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

impl ShapeId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        Self(NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape-{}", self.0)
    }
}

/// A horizontal fill span on canvas row `y`, covering `x_start..=x_end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub y: i32,
    pub x_start: i32,
    pub x_end: i32,
}
