//! 2D vector drawing kernel
//!
//! This crate provides the geometry and editing core of the drawing tool:
//! - [`raster`] - Line rasterization strategies on a brush-cell grid
//! - [`polygon`] - Polygons with contour drawing and scanline fill
//! - [`line`] - Free-standing line segments
//! - [`group`] - Composite groups and the drawable node tree
//! - [`transform`] - Affine transforms with exact inverses
//! - [`selection`] - Hit-testing and the selection set
//! - [`scene`] - The drawing façade with undo/redo and animation frames
//! - [`canvas`] - Canvas trait and the software canvas
//! - [`surface`] - CPU pixel surface the software canvas composites into
//!
//! Shapes live in math space (Y up). Canvas space has Y pointing down and is
//! reached through [`validation::flip_y`].

pub mod canvas;
pub mod constants;
pub mod group;
pub mod line;
pub mod polygon;
pub mod raster;
pub mod scene;
pub mod selection;
pub mod surface;
pub mod transform;
pub mod types;
pub mod validation;
pub mod vertices;

pub use canvas::*;
pub use constants::*;
pub use group::*;
pub use line::*;
pub use polygon::*;
pub use raster::*;
pub use scene::*;
pub use selection::*;
pub use surface::*;
pub use transform::*;
pub use types::*;
pub use validation::*;
pub use vertices::*;
