//! Hit-testing primitives and the selection set

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::{Point, ShapeId};

/// Even-odd ray casting: cast a ray towards +X and count edge crossings
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let (px, py) = (point.x as f64, point.y as f64);
    let mut inside = false;

    for i in 0..n {
        let a = vertices[i].as_dvec2();
        let b = vertices[(i + 1) % n].as_dvec2();
        if (a.y > py) != (b.y > py) {
            let crossing = (b.x - a.x) * (py - a.y) / (b.y - a.y) + a.x;
            if px < crossing {
                inside = !inside;
            }
        }
    }
    inside
}

/// Perpendicular distance from `point` to the segment `a-b`.
///
/// Infinite when the foot of the perpendicular falls outside the segment
/// or the segment has zero length.
pub fn distance_to_segment(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq == 0.0 {
        return f64::INFINITY;
    }
    let t = (point - a).dot(ab) / length_sq;
    if !(0.0..=1.0).contains(&t) {
        return f64::INFINITY;
    }
    (ab.perp_dot(point - a)).abs() / length_sq.sqrt()
}

/// Sum of the Manhattan distances from `point` to both endpoints
pub fn manhattan_to_endpoints(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let to_a = (point - a).abs();
    let to_b = (point - b).abs();
    to_a.x + to_a.y + to_b.x + to_b.y
}

/// Whether `point` is within `threshold` of the segment `a-b`.
///
/// The perpendicular distance only counts when its foot lands between `a`
/// and `b`; this is a segment test, not a test against the infinite line
/// through them. Past either end the sum of the Manhattan distances to both
/// endpoints is used instead, so a click beyond the end of a long line does
/// not select it.
pub fn point_near_segment(point: Point, a: Point, b: Point, threshold: f64) -> bool {
    let (p, a, b) = (point.as_dvec2(), a.as_dvec2(), b.as_dvec2());
    distance_to_segment(p, a, b).min(manhattan_to_endpoints(p, a, b)) < threshold
}

/// Ordered set of selected shapes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    ids: Vec<ShapeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns true if it is now selected.
    pub fn toggle(&mut self, id: ShapeId) -> bool {
        if let Some(index) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(index);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Add `id` if absent. Returns true if it was added.
    pub fn insert(&mut self, id: ShapeId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: ShapeId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| *s != id);
        self.ids.len() != before
    }

    #[inline]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Remove and return every id, in selection order
    pub fn take(&mut self) -> Vec<ShapeId> {
        std::mem::take(&mut self.ids)
    }

    pub fn retain(&mut self, f: impl FnMut(&ShapeId) -> bool) {
        self.ids.retain(f);
    }

    pub fn iter(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.ids.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
