//! Even-odd scanline fill

use super::Polygon;
use crate::canvas::Canvas;
use crate::types::{PrimitiveHandle, Span};

impl Polygon {
    /// Horizontal fill spans in canvas space, top row first.
    ///
    /// Each canvas row `r` is intersected with every edge whose math-space
    /// Y range contains `-r` half-open, so shared vertices count once.
    /// Intersections are truncated, sorted and paired.
    pub fn scanline_spans(&self) -> Vec<Span> {
        let (min, max) = self.vertices.bounds();
        let mut spans = Vec::new();
        let mut crossings: Vec<i32> = Vec::new();

        for row in -max.y..=-min.y {
            let y = -row;
            crossings.clear();

            for (a, b) in self.vertices.edges() {
                if (a.y <= y && y < b.y) || (b.y <= y && y < a.y) {
                    let x = a.x as f64
                        + (y - a.y) as f64 * (b.x - a.x) as f64 / (b.y - a.y) as f64;
                    crossings.push(x as i32);
                }
            }

            crossings.sort_unstable();
            spans.extend(crossings.chunks_exact(2).map(|pair| Span {
                y: row,
                x_start: pair[0],
                x_end: pair[1],
            }));
        }

        spans
    }

    /// Paint the interior as horizontal spans
    pub fn fill_interior(&self, canvas: &mut dyn Canvas) -> Vec<PrimitiveHandle> {
        self.scanline_spans()
            .into_iter()
            .map(|span| canvas.draw_horizontal_span(span.x_start, span.x_end, span.y, self.style.color))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::polygon::{Polygon, ShapeStyle};
    use crate::types::Span;
    use crate::vertices::VertexMatrix;

    fn polygon(points: &[(i32, i32)]) -> Polygon {
        Polygon::new(VertexMatrix::from_tuples(points).unwrap(), ShapeStyle::default()).unwrap()
    }

    fn spans_per_row(spans: &[Span]) -> BTreeMap<i32, usize> {
        let mut rows = BTreeMap::new();
        for span in spans {
            *rows.entry(span.y).or_insert(0) += 1;
        }
        rows
    }

    #[test]
    fn test_square_one_span_per_interior_row() {
        let spans = polygon(&[(0, 0), (10, 0), (10, 10), (0, 10)]).scanline_spans();

        // Math rows 0..=9 map to canvas rows -9..=0; the top edge is excluded
        assert_eq!(spans.len(), 10);
        assert!(spans.iter().all(|s| s.x_start == 0 && s.x_end == 10));
        assert_eq!(spans.first().map(|s| s.y), Some(-9));
        assert_eq!(spans.last().map(|s| s.y), Some(0));
    }

    #[test]
    fn test_convex_at_most_one_span_per_row() {
        let spans = polygon(&[(0, 0), (12, -3), (20, 8), (9, 17), (-4, 9)]).scanline_spans();
        assert!(!spans.is_empty());
        assert!(spans_per_row(&spans).values().all(|&n| n == 1));
        assert!(spans.iter().all(|s| s.x_start <= s.x_end));
    }

    #[test]
    fn test_concave_notch_splits_rows() {
        let spans = polygon(&[(0, 0), (20, 0), (20, 20), (10, 10), (0, 20)]).scanline_spans();
        let rows = spans_per_row(&spans);

        // Above the notch vertex the row is split in two
        assert_eq!(rows.get(&-15), Some(&2));
        // Below it there is a single span
        assert_eq!(rows.get(&-5), Some(&1));

        let split: Vec<_> = spans.iter().filter(|s| s.y == -15).collect();
        assert_eq!((split[0].x_start, split[0].x_end), (0, 5));
        assert_eq!((split[1].x_start, split[1].x_end), (15, 20));
    }

    #[test]
    fn test_intersections_truncate() {
        // Slanted edge x = y / 3 on the left
        let spans = polygon(&[(0, 0), (10, 0), (10, 9), (3, 9)]).scanline_spans();
        let row = spans.iter().find(|s| s.y == -4).unwrap();
        // 4 / 3 = 1.33 truncates to 1
        assert_eq!(row.x_start, 1);
        assert_eq!(row.x_end, 10);
    }
}
