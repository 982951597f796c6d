use glam::IVec2;
use thiserror::Error;

use crate::constants::{
    BLACK, BLUE, GREEN, LIGHT_GRAY, MAX_COORDINATE, MIN_POLYGON_VERTICES, RED, WHITE,
};
use crate::types::{Color, Point};

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Polygon needs at least {} vertices, got {count}", MIN_POLYGON_VERTICES)]
    InvalidGeometry { count: usize },
    #[error("Vertex index {index} out of range for {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },
    #[error("Coordinate ({x}, {y}) outside ±{}", MAX_COORDINATE)]
    CoordinateOutOfRange { x: i64, y: i64 },
    #[error("Invalid brush size: {0}")]
    InvalidBrushSize(i32),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Check that a brush size is usable (>= 1)
pub fn validate_brush_size(size: i32) -> Result<i32, GeometryError> {
    if size < 1 {
        return Err(GeometryError::InvalidBrushSize(size));
    }
    Ok(size)
}

/// Build a point from wide coordinates, rejecting anything past
/// [`MAX_COORDINATE`]
pub fn checked_point(x: i64, y: i64) -> Result<Point, GeometryError> {
    let limit = i64::from(MAX_COORDINATE);
    if x.abs() > limit || y.abs() > limit {
        return Err(GeometryError::CoordinateOutOfRange { x, y });
    }
    Ok(IVec2::new(x as i32, y as i32))
}

/// Snap a coordinate to the nearest lower multiple of the brush size.
///
/// Uses euclidean division so negative coordinates round toward -inf.
#[inline]
pub fn quantize(value: i32, brush_size: i32) -> i32 {
    let brush = brush_size.max(1);
    value.div_euclid(brush) * brush
}

/// Quantize both coordinates of a point
#[inline]
pub fn quantize_point(point: Point, brush_size: i32) -> Point {
    IVec2::new(quantize(point.x, brush_size), quantize(point.y, brush_size))
}

/// Index of the brush cell containing a point
#[inline]
pub fn cell_index(point: Point, brush_size: i32) -> Point {
    let brush = brush_size.max(1);
    IVec2::new(point.x.div_euclid(brush), point.y.div_euclid(brush))
}

/// Convert between math space (Y up) and canvas space (Y down)
#[inline]
pub fn flip_y(point: Point) -> Point {
    IVec2::new(point.x, point.y.saturating_neg())
}

/// Map a raw canvas click to the polygon vertex it should create.
///
/// The point is snapped to the centre of its brush cell and its Y axis is
/// flipped so that stored vertices grow upward.
pub fn snap_to_brush_grid(canvas_point: Point, brush_size: i32) -> Point {
    let brush = brush_size.max(1);
    let half = brush / 2;
    IVec2::new(
        quantize(canvas_point.x, brush).saturating_add(half),
        quantize(canvas_point.y.saturating_neg(), brush).saturating_add(half),
    )
}

/// Parse a color from `#rrggbb`, `#rrggbbaa` or a basic color name
pub fn parse_color(input: &str) -> Result<Color, GeometryError> {
    let trimmed = input.trim();
    let named = match trimmed.to_ascii_lowercase().as_str() {
        "black" => Some(BLACK),
        "white" => Some(WHITE),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "lightgray" | "lightgrey" => Some(LIGHT_GRAY),
        _ => None,
    };
    if let Some(color) = named {
        return Ok(color);
    }

    let invalid = || GeometryError::InvalidColor(input.to_string());
    let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(invalid());
    }

    let mut channels = [1.0f32; 4];
    for (i, channel) in channels.iter_mut().enumerate().take(hex.len() / 2) {
        let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        *channel = byte as f32 / 255.0;
    }
    Ok(channels)
}
