//! Explicit slope-intercept rasterization

use glam::IVec2;

use super::{RasterLine, push_cell, stride};
use crate::types::Point;
use crate::validation::quantize_point;

/// Evaluates `y = m·x + b` along x, or `x = m⁻¹·y + b` when the line is steep
#[derive(Debug, Clone, Copy, Default)]
pub struct SlopeLine;

impl RasterLine for SlopeLine {
    fn name(&self) -> &'static str {
        "slope"
    }

    fn cells(&self, brush_size: i32, from: Point, to: Point) -> Vec<Point> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let mut cells = Vec::new();

        if dx == 0 {
            for y in stride(from.y, to.y, brush_size) {
                push_cell(&mut cells, quantize_point(IVec2::new(from.x, y), brush_size));
            }
            return cells;
        }

        if dy.abs() <= dx.abs() {
            let m = dy as f64 / dx as f64;
            let b = from.y as f64 - m * from.x as f64;
            for x in stride(from.x, to.x, brush_size) {
                let y = (m * x as f64 + b).round() as i32;
                push_cell(&mut cells, quantize_point(IVec2::new(x, y), brush_size));
            }
        } else {
            let inv = dx as f64 / dy as f64;
            let b = from.x as f64 - inv * from.y as f64;
            for y in stride(from.y, to.y, brush_size) {
                let x = (inv * y as f64 + b).round() as i32;
                push_cell(&mut cells, quantize_point(IVec2::new(x, y), brush_size));
            }
        }

        cells
    }
}
