//! Elementary homogeneous matrices, each paired with its exact inverse

use glam::{DMat3, DVec2};

use super::{Reflection, ReflectionMode};

/// A matrix and its inverse
pub type MatrixPair = (DMat3, DMat3);

/// Build a matrix from rows as written on paper
#[inline]
pub fn from_rows(rows: [[f64; 3]; 3]) -> DMat3 {
    DMat3::from_cols_array_2d(&rows).transpose()
}

pub fn translation(offset: DVec2) -> MatrixPair {
    (
        from_rows([[1.0, 0.0, offset.x], [0.0, 1.0, offset.y], [0.0, 0.0, 1.0]]),
        from_rows([[1.0, 0.0, -offset.x], [0.0, 1.0, -offset.y], [0.0, 0.0, 1.0]]),
    )
}

/// Re-centre an origin-based pair on `pivot`: `T(c)·Op·T(-c)` and `T(c)·Op⁻¹·T(-c)`
pub fn about_pivot(pivot: DVec2, (op, op_inv): MatrixPair) -> MatrixPair {
    let (to_pivot, from_pivot) = translation(pivot);
    (to_pivot * op * from_pivot, to_pivot * op_inv * from_pivot)
}

/// Scale about the origin. Factors must be non-zero.
pub fn scale(factors: DVec2) -> MatrixPair {
    (
        from_rows([[factors.x, 0.0, 0.0], [0.0, factors.y, 0.0], [0.0, 0.0, 1.0]]),
        from_rows([
            [1.0 / factors.x, 0.0, 0.0],
            [0.0, 1.0 / factors.y, 0.0],
            [0.0, 0.0, 1.0],
        ]),
    )
}

/// Rotation about the origin. Clockwise uses `[[cos, sin], [-sin, cos]]`.
pub fn rotation(degrees: f64, clockwise: bool) -> MatrixPair {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let cw = from_rows([[cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]]);
    let ccw = from_rows([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]]);
    if clockwise { (cw, ccw) } else { (ccw, cw) }
}

/// X shear followed by Y shear (`Sy·Sx`); inverse is `Sx⁻¹·Sy⁻¹`
pub fn shear(factors: DVec2) -> MatrixPair {
    let shear_x = |k: f64| from_rows([[1.0, k, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    let shear_y = |k: f64| from_rows([[1.0, 0.0, 0.0], [k, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    (
        shear_y(factors.y) * shear_x(factors.x),
        shear_x(-factors.x) * shear_y(-factors.y),
    )
}

/// Reflection matrix. Every reflection is its own inverse.
pub fn reflection(reflect: &Reflection) -> DMat3 {
    match reflect.mode {
        ReflectionMode::None => DMat3::IDENTITY,
        ReflectionMode::XAxis => from_rows([[1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]]),
        ReflectionMode::YAxis => from_rows([[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]),
        ReflectionMode::Origin => from_rows([[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]]),
        ReflectionMode::Line => {
            // Move the line onto the X axis, flip, move it back
            let (shift_down, shift_up) = translation(DVec2::new(0.0, -reflect.intercept));
            let angle = reflect.slope.atan().to_degrees();
            let (level, unlevel) = rotation(angle, true);
            let flip = from_rows([[1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]]);
            shift_up * unlevel * flip * level * shift_down
        }
    }
}
