//! Digital differential analyzer

use glam::{DVec2, IVec2};

use super::{RasterLine, push_cell};
use crate::types::Point;
use crate::validation::quantize_point;

/// Walks the segment in equal real-valued increments, sampling from the
/// centre of each pixel
#[derive(Debug, Clone, Copy, Default)]
pub struct DdaLine;

impl RasterLine for DdaLine {
    fn name(&self) -> &'static str {
        "dda"
    }

    fn cells(&self, brush_size: i32, from: Point, to: Point) -> Vec<Point> {
        let brush = brush_size.max(1);
        let delta = (to - from).as_dvec2();
        let major = delta.x.abs().max(delta.y.abs()) as i32;

        let steps = if major == 0 { 0 } else { (major / brush).max(1) };
        let increment = if steps == 0 {
            DVec2::ZERO
        } else {
            delta / steps as f64
        };
        let start = from.as_dvec2() + DVec2::splat(0.5);

        let mut cells = Vec::with_capacity(steps as usize + 1);
        for i in 0..=steps {
            // Computed from the start each step so error does not accumulate
            let sample = (start + increment * i as f64).floor();
            let pixel = IVec2::new(sample.x as i32, sample.y as i32);
            push_cell(&mut cells, quantize_point(pixel, brush));
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_count_follows_brush() {
        // 12 px major axis with brush 4 -> 3 steps, 4 samples
        let cells = DdaLine.cells(4, IVec2::new(0, 0), IVec2::new(12, 0));
        assert_eq!(
            cells,
            vec![IVec2::new(0, 0), IVec2::new(4, 0), IVec2::new(8, 0), IVec2::new(12, 0)]
        );
    }

    #[test]
    fn test_short_line_with_large_brush() {
        // Major axis shorter than the brush still takes one step
        let cells = DdaLine.cells(8, IVec2::new(0, 0), IVec2::new(9, 3));
        assert_eq!(cells, vec![IVec2::new(0, 0), IVec2::new(8, 0)]);
    }

    #[test]
    fn test_negative_direction() {
        let cells = DdaLine.cells(1, IVec2::new(0, 0), IVec2::new(-3, -3));
        assert_eq!(
            cells,
            vec![
                IVec2::new(0, 0),
                IVec2::new(-1, -1),
                IVec2::new(-2, -2),
                IVec2::new(-3, -3),
            ]
        );
    }
}
