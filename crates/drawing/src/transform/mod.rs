//! Affine transformation requests and their composed matrices
//!
//! A [`TransformRequest`] describes translate, scale, rotate, shear and
//! reflect parameters at once. [`TransformationRecord::new`] validates it
//! and folds everything into one homogeneous matrix
//! `M = Reflect · Shear · Rotate · Scale · Translate` together with the
//! exact inverse, pivoting scale, rotation and shear on a given point
//! (the shape centroid in practice).

pub mod matrices;

use glam::{DMat3, DVec2, IVec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Point;
use crate::validation::GeometryError;
use crate::vertices::{VertexMatrix, round_to_point};

#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("Degenerate scale ({sx}, {sy}): factors must be non-zero")]
    DegenerateTransform { sx: f64, sy: f64 },
    #[error("Invalid {0} parameter: must be finite")]
    InvalidParameter(&'static str),
    #[error("Transformed vertex out of range: {0}")]
    OutOfRange(GeometryError),
}

/// Reflection axis selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReflectionMode {
    #[default]
    None,
    XAxis,
    YAxis,
    Origin,
    /// Across `y = slope·x + intercept`
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reflection {
    pub mode: ReflectionMode,
    pub slope: f64,
    pub intercept: f64,
}

impl Reflection {
    pub fn axis(mode: ReflectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn line(slope: f64, intercept: f64) -> Self {
        Self {
            mode: ReflectionMode::Line,
            slope,
            intercept,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotation {
    pub degrees: f64,
    pub clockwise: bool,
}

/// Parameters of one combined transformation. `Default` is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformRequest {
    pub translate: IVec2,
    pub scale: DVec2,
    pub rotate: Rotation,
    pub shear: DVec2,
    pub reflect: Reflection,
}

impl Default for TransformRequest {
    fn default() -> Self {
        Self {
            translate: IVec2::ZERO,
            scale: DVec2::ONE,
            rotate: Rotation::default(),
            shear: DVec2::ZERO,
            reflect: Reflection::default(),
        }
    }
}

impl TransformRequest {
    pub fn with_translate(mut self, dx: i32, dy: i32) -> Self {
        self.translate = IVec2::new(dx, dy);
        self
    }

    pub fn with_scale(mut self, sx: f64, sy: f64) -> Self {
        self.scale = DVec2::new(sx, sy);
        self
    }

    pub fn with_rotate(mut self, degrees: f64, clockwise: bool) -> Self {
        self.rotate = Rotation { degrees, clockwise };
        self
    }

    pub fn with_shear(mut self, shx: f64, shy: f64) -> Self {
        self.shear = DVec2::new(shx, shy);
        self
    }

    pub fn with_reflect(mut self, reflect: Reflection) -> Self {
        self.reflect = reflect;
        self
    }

    /// Check the parameters without building any matrix
    pub fn validate(&self) -> Result<(), TransformError> {
        if !self.scale.is_finite() {
            return Err(TransformError::InvalidParameter("scale"));
        }
        if self.scale.x == 0.0 || self.scale.y == 0.0 {
            return Err(TransformError::DegenerateTransform {
                sx: self.scale.x,
                sy: self.scale.y,
            });
        }
        if !self.rotate.degrees.is_finite() {
            return Err(TransformError::InvalidParameter("rotation"));
        }
        if !self.shear.is_finite() {
            return Err(TransformError::InvalidParameter("shear"));
        }
        if self.reflect.mode == ReflectionMode::Line
            && !(self.reflect.slope.is_finite() && self.reflect.intercept.is_finite())
        {
            return Err(TransformError::InvalidParameter("reflection line"));
        }
        Ok(())
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// A validated request with its combined matrix and exact inverse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationRecord {
    pub matrix: DMat3,
    pub inverse: DMat3,
    /// Point scale, rotation and shear were pivoted on
    pub pivot: DVec2,
    pub request: TransformRequest,
}

impl TransformationRecord {
    pub fn new(request: &TransformRequest, pivot: DVec2) -> Result<Self, TransformError> {
        request.validate()?;

        let (t, t_inv) = matrices::translation(request.translate.as_dvec2());
        let (s, s_inv) = matrices::about_pivot(pivot, matrices::scale(request.scale));
        let (r, r_inv) = matrices::about_pivot(
            pivot,
            matrices::rotation(request.rotate.degrees, request.rotate.clockwise),
        );
        let (sh, sh_inv) = matrices::about_pivot(pivot, matrices::shear(request.shear));
        let refl = matrices::reflection(&request.reflect);

        Ok(Self {
            matrix: refl * sh * r * s * t,
            inverse: t_inv * s_inv * r_inv * sh_inv * refl,
            pivot,
            request: *request,
        })
    }

    /// Build a record pivoted on the centroid of `vertices`
    pub fn for_vertices(
        request: &TransformRequest,
        vertices: &VertexMatrix,
    ) -> Result<Self, TransformError> {
        Self::new(request, vertices.centroid())
    }

    /// `round(M · p)`
    pub fn apply_to_point(&self, point: Point) -> Result<Point, TransformError> {
        round_to_point(self.matrix.transform_point2(point.as_dvec2()))
            .map_err(TransformError::OutOfRange)
    }

    /// `round(M⁻¹ · p)`
    pub fn revert_point(&self, point: Point) -> Result<Point, TransformError> {
        round_to_point(self.inverse.transform_point2(point.as_dvec2()))
            .map_err(TransformError::OutOfRange)
    }

    /// Map every vertex through `M`. Fails without partial results when any
    /// vertex leaves the coordinate range.
    pub fn transform(&self, vertices: &VertexMatrix) -> Result<VertexMatrix, TransformError> {
        vertices.try_map(|p| self.apply_to_point(p))
    }

    pub fn revert(&self, vertices: &VertexMatrix) -> Result<VertexMatrix, TransformError> {
        vertices.try_map(|p| self.revert_point(p))
    }
}
