//! Shared configuration for polydraw
//!
//! This crate is the single source of truth for brush defaults, canvas
//! dimensions, selection feedback and undo depth. Every section can be
//! loaded from JSON (missing fields fall back to defaults) and then
//! overridden from `POLYDRAW_*` environment variables.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Default brush size in pixels
pub const DEFAULT_BRUSH_SIZE: i32 = 1;

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 1900;

/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 800;

/// Distance (pixels) under which a click counts as hitting a line
pub const DEFAULT_HIT_DISTANCE: f64 = 10.0;

/// Maximum number of undo entries kept
pub const DEFAULT_MAX_UNDO_LEVELS: usize = 100;

pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown line algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Line rasterization algorithm selected for new shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineAlgorithm {
    Slope,
    Dda,
    BresenhamFloat,
    #[default]
    BresenhamInteger,
}

impl FromStr for LineAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slope" => Ok(Self::Slope),
            "dda" => Ok(Self::Dda),
            "bresenham-float" | "bresenham" => Ok(Self::BresenhamFloat),
            "bresenham-integer" | "bresenham-int" => Ok(Self::BresenhamInteger),
            other => Err(ConfigError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Brush settings applied to newly created shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Brush cell size in pixels (>= 1)
    pub size: i32,
    /// RGBA drawing color
    pub color: [f32; 4],
    pub algorithm: LineAlgorithm,
    /// Whether new polygons get a scanline fill
    pub fill: bool,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BRUSH_SIZE,
            color: BLACK,
            algorithm: LineAlgorithm::default(),
            fill: true,
        }
    }
}

/// Software canvas settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background: [f32; 4],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            background: WHITE,
        }
    }
}

/// Selection feedback and hit-testing tolerance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Outline color used while a shape is selected
    pub highlight_color: [f32; 4],
    pub hit_distance: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            highlight_color: RED,
            hit_distance: DEFAULT_HIT_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_undo_levels: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_undo_levels: DEFAULT_MAX_UNDO_LEVELS,
        }
    }
}

/// Complete drawing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    pub brush: BrushConfig,
    pub canvas: CanvasConfig,
    pub selection: SelectionConfig,
    pub history: HistoryConfig,
}

impl DrawingConfig {
    /// Parse a configuration from JSON. Missing sections use their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Override fields from `POLYDRAW_*` environment variables.
    ///
    /// If any value is invalid the error is logged and none of the
    /// overrides are applied.
    pub fn apply_env_overrides(&mut self) {
        let lookup = |key: &str| std::env::var(key).ok();
        if let Err(e) = self.apply_overrides(lookup) {
            warn!("Ignoring invalid configuration override: {}", e);
        }
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Recognized keys: `POLYDRAW_BRUSH_SIZE`, `POLYDRAW_LINE_ALGORITHM`,
    /// `POLYDRAW_FILL`, `POLYDRAW_MAX_UNDO`, `POLYDRAW_HIT_DISTANCE`.
    /// Every present key is parsed first; the configuration only changes
    /// when all of them are valid.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let size = parse_override(&lookup, "POLYDRAW_BRUSH_SIZE", |v| {
            v.parse::<i32>().ok().filter(|size| *size >= 1)
        })?;
        let algorithm = lookup("POLYDRAW_LINE_ALGORITHM")
            .map(|value| value.parse::<LineAlgorithm>())
            .transpose()?;
        let fill = parse_override(&lookup, "POLYDRAW_FILL", |v| match v {
            "1" | "true" | "on" => Some(true),
            "0" | "false" | "off" => Some(false),
            _ => None,
        })?;
        let max_undo_levels =
            parse_override(&lookup, "POLYDRAW_MAX_UNDO", |v| v.parse::<usize>().ok())?;
        let hit_distance = parse_override(&lookup, "POLYDRAW_HIT_DISTANCE", |v| {
            v.parse::<f64>()
                .ok()
                .filter(|distance| distance.is_finite() && *distance > 0.0)
        })?;

        if let Some(size) = size {
            self.brush.size = size;
        }
        if let Some(algorithm) = algorithm {
            self.brush.algorithm = algorithm;
        }
        if let Some(fill) = fill {
            self.brush.fill = fill;
        }
        if let Some(levels) = max_undo_levels {
            self.history.max_undo_levels = levels;
        }
        if let Some(distance) = hit_distance {
            self.selection.hit_distance = distance;
        }
        Ok(())
    }
}

/// Look up `key` and parse its trimmed value. Absent keys give `Ok(None)`.
fn parse_override<F, T>(
    lookup: &F,
    key: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    match parse(value.trim()) {
        Some(parsed) => Ok(Some(parsed)),
        None => Err(ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = DrawingConfig::default();
        assert_eq!(config.brush.size, DEFAULT_BRUSH_SIZE);
        assert_eq!(config.brush.algorithm, LineAlgorithm::BresenhamInteger);
        assert!(config.brush.fill);
        assert_eq!(config.canvas.width, DEFAULT_CANVAS_WIDTH);
        assert_eq!(config.selection.highlight_color, RED);
        assert_eq!(config.history.max_undo_levels, DEFAULT_MAX_UNDO_LEVELS);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            DrawingConfig::from_json(r#"{ "brush": { "size": 4, "algorithm": "dda" } }"#).unwrap();
        assert_eq!(config.brush.size, 4);
        assert_eq!(config.brush.algorithm, LineAlgorithm::Dda);
        assert_eq!(config.brush.color, BLACK);
        assert_eq!(config.canvas.height, DEFAULT_CANVAS_HEIGHT);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = DrawingConfig::default();
        config.brush.algorithm = LineAlgorithm::Slope;
        config.history.max_undo_levels = 5;

        let json = config.to_json().unwrap();
        let parsed = DrawingConfig::from_json(&json).unwrap();
        assert_eq!(parsed.brush.algorithm, LineAlgorithm::Slope);
        assert_eq!(parsed.history.max_undo_levels, 5);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            DrawingConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("DDA".parse::<LineAlgorithm>().unwrap(), LineAlgorithm::Dda);
        assert_eq!(
            "bresenham-int".parse::<LineAlgorithm>().unwrap(),
            LineAlgorithm::BresenhamInteger
        );
        assert!("spline".parse::<LineAlgorithm>().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = DrawingConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("POLYDRAW_BRUSH_SIZE", "3"),
                ("POLYDRAW_LINE_ALGORITHM", "slope"),
                ("POLYDRAW_FILL", "off"),
                ("POLYDRAW_MAX_UNDO", "7"),
            ]))
            .unwrap();

        assert_eq!(config.brush.size, 3);
        assert_eq!(config.brush.algorithm, LineAlgorithm::Slope);
        assert!(!config.brush.fill);
        assert_eq!(config.history.max_undo_levels, 7);
    }

    #[test]
    fn test_invalid_brush_override() {
        let mut config = DrawingConfig::default();
        let result = config.apply_overrides(lookup_from(&[("POLYDRAW_BRUSH_SIZE", "0")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        assert_eq!(config.brush.size, DEFAULT_BRUSH_SIZE);
    }

    #[test]
    fn test_invalid_override_applies_nothing() {
        let mut config = DrawingConfig::default();
        let result = config.apply_overrides(lookup_from(&[
            ("POLYDRAW_BRUSH_SIZE", "3"),
            ("POLYDRAW_LINE_ALGORITHM", "dda"),
            ("POLYDRAW_FILL", "maybe"),
            ("POLYDRAW_HIT_DISTANCE", "4.5"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "POLYDRAW_FILL",
                ..
            })
        ));
        assert_eq!(config.brush.size, DEFAULT_BRUSH_SIZE);
        assert_eq!(config.brush.algorithm, LineAlgorithm::BresenhamInteger);
        assert!(config.brush.fill);
        assert_eq!(config.selection.hit_distance, DEFAULT_HIT_DISTANCE);
    }
}
