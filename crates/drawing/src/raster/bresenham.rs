//! Bresenham rasterization on the brush-cell lattice
//!
//! Both variants walk whole brush cells between the cells containing the
//! endpoints, advancing the minor axis whenever the error term crosses
//! zero. They differ only in how that error term is kept.

use glam::IVec2;

use super::{RasterLine, push_cell};
use crate::types::Point;
use crate::validation::cell_index;

/// Endpoints reduced to a major/minor axis walk
struct CellWalk {
    start: IVec2,
    /// Steps along the major axis
    major: i32,
    /// Steps along the minor axis
    minor: i32,
    major_step: IVec2,
    minor_step: IVec2,
}

impl CellWalk {
    fn new(brush: i32, from: Point, to: Point) -> Self {
        let start = cell_index(from, brush);
        let end = cell_index(to, brush);
        let delta = end - start;
        let sign = IVec2::new(
            if delta.x < 0 { -1 } else { 1 },
            if delta.y < 0 { -1 } else { 1 },
        );

        if delta.y.abs() > delta.x.abs() {
            Self {
                start,
                major: delta.y.abs(),
                minor: delta.x.abs(),
                major_step: IVec2::new(0, sign.y),
                minor_step: IVec2::new(sign.x, 0),
            }
        } else {
            Self {
                start,
                major: delta.x.abs(),
                minor: delta.y.abs(),
                major_step: IVec2::new(sign.x, 0),
                minor_step: IVec2::new(0, sign.y),
            }
        }
    }
}

/// Bresenham with a real-valued error `e = m - 0.5`
#[derive(Debug, Clone, Copy, Default)]
pub struct BresenhamLine;

impl RasterLine for BresenhamLine {
    fn name(&self) -> &'static str {
        "bresenham"
    }

    fn cells(&self, brush_size: i32, from: Point, to: Point) -> Vec<Point> {
        let brush = brush_size.max(1);
        let walk = CellWalk::new(brush, from, to);
        let slope = if walk.major == 0 {
            0.0
        } else {
            walk.minor as f64 / walk.major as f64
        };

        let mut cells = Vec::with_capacity(walk.major as usize + 1);
        let mut cell = walk.start;
        let mut error = slope - 0.5;
        for _ in 0..=walk.major {
            push_cell(&mut cells, cell * brush);
            if error > 0.0 {
                cell += walk.minor_step;
                error -= 1.0;
            }
            error += slope;
            cell += walk.major_step;
        }
        cells
    }
}

/// Bresenham with the doubled integer decision variable `D = 2·dy - dx`
#[derive(Debug, Clone, Copy, Default)]
pub struct BresenhamIntLine;

impl RasterLine for BresenhamIntLine {
    fn name(&self) -> &'static str {
        "bresenham-int"
    }

    fn cells(&self, brush_size: i32, from: Point, to: Point) -> Vec<Point> {
        let brush = brush_size.max(1);
        let walk = CellWalk::new(brush, from, to);

        let mut cells = Vec::with_capacity(walk.major as usize + 1);
        let mut cell = walk.start;
        let mut decision = 2 * walk.minor - walk.major;
        for _ in 0..=walk.major {
            push_cell(&mut cells, cell * brush);
            if decision > 0 {
                cell += walk.minor_step;
                decision -= 2 * walk.major;
            }
            decision += 2 * walk.minor;
            cell += walk.major_step;
        }
        cells
    }
}
