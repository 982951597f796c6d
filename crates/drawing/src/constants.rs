use crate::types::Color;

/// Minimum number of vertices a polygon can have.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Largest coordinate magnitude a stored vertex may have.
///
/// Keeps Y negation and the raster deltas between two vertices inside `i32`.
pub const MAX_COORDINATE: i32 = 1 << 28;

/// Default brush cell size in pixels.
pub const DEFAULT_BRUSH_SIZE: i32 = polydraw_config::DEFAULT_BRUSH_SIZE;

pub const BLACK: Color = polydraw_config::BLACK;
pub const WHITE: Color = polydraw_config::WHITE;
pub const RED: Color = polydraw_config::RED;
pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
pub const BLUE: Color = [0.0, 0.0, 1.0, 1.0];
pub const LIGHT_GRAY: Color = [0.827, 0.827, 0.827, 1.0];
