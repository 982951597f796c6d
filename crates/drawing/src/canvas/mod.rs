//! Canvas collaborator: the primitive-level drawing surface shapes paint onto
//!
//! Shapes never touch pixels directly. They ask a [`Canvas`] for filled
//! squares and horizontal spans and keep the returned handles so they can
//! later erase or recolor exactly what they drew.

mod software;

pub use software::SoftwareCanvas;

use serde::{Deserialize, Serialize};

use crate::types::{Color, PrimitiveHandle};

/// Primitive-level drawing surface.
///
/// Coordinates are in canvas space: X grows right, Y grows down.
pub trait Canvas {
    /// Draw a `size` x `size` filled square with its top-left corner at `(x, y)`.
    /// The outline starts out in the fill color.
    fn draw_filled_rect(&mut self, x: i32, y: i32, size: i32, color: Color) -> PrimitiveHandle;

    /// Draw a horizontal span covering `x1..=x2` on row `y`
    fn draw_horizontal_span(&mut self, x1: i32, x2: i32, y: i32, color: Color) -> PrimitiveHandle;

    /// Remove a primitive. Returns false for unknown handles.
    fn erase(&mut self, handle: PrimitiveHandle) -> bool;

    /// Change both fill and outline of a primitive
    fn recolor(&mut self, handle: PrimitiveHandle, color: Color) -> bool;

    /// Change only the outline of a primitive.
    /// Returns false for unknown handles and primitives without an outline.
    fn set_outline(&mut self, handle: PrimitiveHandle, color: Color) -> bool;
}

/// A primitive as stored by [`SoftwareCanvas`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Rect {
        x: i32,
        y: i32,
        size: i32,
        fill: Color,
        outline: Color,
    },
    Span {
        x1: i32,
        x2: i32,
        y: i32,
        color: Color,
    },
}

impl Primitive {
    /// Fill color of the primitive
    pub fn fill(&self) -> Color {
        match self {
            Primitive::Rect { fill, .. } => *fill,
            Primitive::Span { color, .. } => *color,
        }
    }

    /// Bounding box in canvas space as (x, y, width, height)
    pub fn bounds(&self) -> (i64, i64, i64, i64) {
        match *self {
            Primitive::Rect { x, y, size, .. } => (x as i64, y as i64, size as i64, size as i64),
            Primitive::Span { x1, x2, y, .. } => {
                let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
                (lo as i64, y as i64, hi as i64 - lo as i64 + 1, 1)
            }
        }
    }
}
