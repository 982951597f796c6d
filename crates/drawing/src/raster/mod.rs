//! Line rasterization strategies
//!
//! Every strategy turns a segment into a sequence of brush cells: squares
//! of `brush_size` pixels whose top-left corner sits on a multiple of the
//! brush size. The first and last cells are always the quantized
//! endpoints, and consecutive duplicates are collapsed.

mod bresenham;
mod dda;
mod slope;

pub use bresenham::{BresenhamIntLine, BresenhamLine};
pub use dda::DdaLine;
pub use slope::SlopeLine;

use polydraw_config::LineAlgorithm;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::types::{Color, Point, PrimitiveHandle};

/// Cells and canvas handles produced by drawing one segment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RasterOutput {
    /// Top-left corners of the painted brush cells, in order
    pub cells: Vec<Point>,
    /// One handle per cell
    pub handles: Vec<PrimitiveHandle>,
}

/// A line rasterization algorithm
pub trait RasterLine {
    /// Human-readable algorithm name
    fn name(&self) -> &'static str;

    /// Compute the brush cells covering the segment `from -> to`.
    ///
    /// Endpoints are expected within ±[`MAX_COORDINATE`](crate::constants::MAX_COORDINATE) so that the
    /// deltas between them fit in `i32`.
    fn cells(&self, brush_size: i32, from: Point, to: Point) -> Vec<Point>;

    /// Paint one filled square per cell and collect the handles
    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        color: Color,
        brush_size: i32,
        from: Point,
        to: Point,
    ) -> RasterOutput {
        let brush = brush_size.max(1);
        let cells = self.cells(brush, from, to);
        let handles = cells
            .iter()
            .map(|cell| canvas.draw_filled_rect(cell.x, cell.y, brush, color))
            .collect();
        RasterOutput { cells, handles }
    }
}

/// Selectable rasterization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RasterStrategy {
    Slope,
    Dda,
    /// Bresenham with a real-valued error term
    Bresenham,
    /// Bresenham with a doubled integer decision variable
    #[default]
    BresenhamInt,
}

impl RasterStrategy {
    pub const ALL: [RasterStrategy; 4] = [
        RasterStrategy::Slope,
        RasterStrategy::Dda,
        RasterStrategy::Bresenham,
        RasterStrategy::BresenhamInt,
    ];

    fn algorithm(&self) -> &'static dyn RasterLine {
        match self {
            RasterStrategy::Slope => &SlopeLine,
            RasterStrategy::Dda => &DdaLine,
            RasterStrategy::Bresenham => &BresenhamLine,
            RasterStrategy::BresenhamInt => &BresenhamIntLine,
        }
    }
}

impl RasterLine for RasterStrategy {
    fn name(&self) -> &'static str {
        self.algorithm().name()
    }

    fn cells(&self, brush_size: i32, from: Point, to: Point) -> Vec<Point> {
        self.algorithm().cells(brush_size, from, to)
    }
}

impl From<LineAlgorithm> for RasterStrategy {
    fn from(algorithm: LineAlgorithm) -> Self {
        match algorithm {
            LineAlgorithm::Slope => RasterStrategy::Slope,
            LineAlgorithm::Dda => RasterStrategy::Dda,
            LineAlgorithm::BresenhamFloat => RasterStrategy::Bresenham,
            LineAlgorithm::BresenhamInteger => RasterStrategy::BresenhamInt,
        }
    }
}

/// Append a cell unless it repeats the previous one
#[inline]
pub(crate) fn push_cell(cells: &mut Vec<Point>, cell: Point) {
    if cells.last() != Some(&cell) {
        cells.push(cell);
    }
}

/// Positions from `start` to `end` in `step` increments, always ending at `end`
pub(crate) fn stride(start: i32, end: i32, step: i32) -> Vec<i32> {
    let step = step.max(1);
    let dir = if end >= start { 1 } else { -1 };
    let count = (end - start).abs() / step;

    let mut positions: Vec<i32> = (0..=count).map(|i| start + dir * i * step).collect();
    if positions.last() != Some(&end) {
        positions.push(end);
    }
    positions
}
