//! Polygon vertex storage in homogeneous form

use glam::{DVec2, DVec3, IVec2};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_COORDINATE, MIN_POLYGON_VERTICES};
use crate::types::Point;
use crate::validation::{GeometryError, checked_point};

/// Ordered vertices of a closed polygon, at least three of them, each
/// within ±[`MAX_COORDINATE`] on both axes.
///
/// Conceptually a 3×N matrix whose columns are `[x; y; 1]`; the homogeneous
/// row is implicit and materialized by [`homogeneous`](Self::homogeneous).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct VertexMatrix {
    columns: Vec<Point>,
}

impl VertexMatrix {
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < MIN_POLYGON_VERTICES {
            return Err(GeometryError::InvalidGeometry {
                count: points.len(),
            });
        }
        for p in &points {
            checked_point(i64::from(p.x), i64::from(p.y))?;
        }
        Ok(Self { columns: points })
    }

    /// Convenience constructor from `(x, y)` pairs
    pub fn from_tuples(points: &[(i32, i32)]) -> Result<Self, GeometryError> {
        Self::new(points.iter().map(|&(x, y)| IVec2::new(x, y)).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Never true for a constructed matrix
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.columns
    }

    #[inline]
    pub fn point(&self, index: usize) -> Option<Point> {
        self.columns.get(index).copied()
    }

    /// Replace a single vertex
    pub fn set_point(&mut self, index: usize, point: Point) -> Result<(), GeometryError> {
        let len = self.columns.len();
        let slot = self
            .columns
            .get_mut(index)
            .ok_or(GeometryError::VertexOutOfRange { index, len })?;
        *slot = checked_point(i64::from(point.x), i64::from(point.y))?;
        Ok(())
    }

    /// Edges as `(from, to)` pairs; the last edge closes back to vertex 0
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.columns.len();
        (0..n).map(move |i| (self.columns[i], self.columns[(i + 1) % n]))
    }

    /// Columns as homogeneous `[x, y, 1]` vectors
    pub fn homogeneous(&self) -> Vec<DVec3> {
        self.columns
            .iter()
            .map(|p| DVec3::new(p.x as f64, p.y as f64, 1.0))
            .collect()
    }

    /// Rebuild from homogeneous columns, rounding to the nearest integer.
    /// The third component is assumed to be 1 (affine transforms keep it so).
    pub fn from_homogeneous(columns: &[DVec3]) -> Result<Self, GeometryError> {
        let points = columns
            .iter()
            .map(|c| round_to_point(c.truncate()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(points)
    }

    /// Arithmetic mean of the vertices
    pub fn centroid(&self) -> DVec2 {
        let sum: DVec2 = self.columns.iter().map(|p| p.as_dvec2()).sum();
        sum / self.columns.len() as f64
    }

    /// Axis-aligned bounds as `(min, max)`
    pub fn bounds(&self) -> (Point, Point) {
        self.columns.iter().fold(
            (IVec2::splat(i32::MAX), IVec2::splat(i32::MIN)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        )
    }

    /// Apply `f` to every vertex, stopping at the first error.
    ///
    /// The vertex count is preserved. `f` is responsible for keeping the
    /// results within range.
    pub fn try_map<E>(&self, f: impl Fn(Point) -> Result<Point, E>) -> Result<Self, E> {
        let columns = self
            .columns
            .iter()
            .map(|p| f(*p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { columns })
    }

    /// Shift every vertex by `offset`
    pub fn translated(&self, offset: IVec2) -> Result<Self, GeometryError> {
        self.try_map(|p| {
            checked_point(
                i64::from(p.x) + i64::from(offset.x),
                i64::from(p.y) + i64::from(offset.y),
            )
        })
    }
}

/// Round a transformed position to the nearest vertex.
///
/// Non-finite values and anything past [`MAX_COORDINATE`] are rejected
/// rather than saturated.
pub fn round_to_point(position: DVec2) -> Result<Point, GeometryError> {
    let rounded = position.round();
    let limit = f64::from(MAX_COORDINATE);
    if !(rounded.x.abs() <= limit && rounded.y.abs() <= limit) {
        return Err(GeometryError::CoordinateOutOfRange {
            x: rounded.x as i64,
            y: rounded.y as i64,
        });
    }
    Ok(IVec2::new(rounded.x as i32, rounded.y as i32))
}

impl TryFrom<Vec<Point>> for VertexMatrix {
    type Error = GeometryError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<VertexMatrix> for Vec<Point> {
    fn from(matrix: VertexMatrix) -> Self {
        matrix.columns
    }
}
