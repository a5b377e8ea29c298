//! Rigid rotations about arbitrary axes.

use cgmath::{InnerSpace, Matrix3, Matrix4, Point3, Rad, Vector3};

use crate::Float;

/// Angle of a quarter turn.
pub const QUARTER_TURN: Rad<Float> = Rad(std::f64::consts::FRAC_PI_2);

/// Returns the affine transform that rotates space by `angle` around the line
/// through `pivot` with direction `axis`, using the right-hand rule.
///
/// `axis` does not need to be normalized. If it is zero, the identity is
/// returned.
pub fn rotation_about_point(
    pivot: Point3<Float>,
    axis: Vector3<Float>,
    angle: Rad<Float>,
) -> Matrix4<Float> {
    let mag = axis.magnitude();
    if mag < crate::EPSILON {
        return Matrix4::from_scale(1.0);
    }
    let Vector3 { x: u, y: v, z: w } = axis / mag;
    let Point3 { x: a, y: b, z: c } = pivot;

    let (sin, cos) = angle.0.sin_cos();
    let k = 1.0 - cos;

    let (uu, vv, ww) = (u * u, v * v, w * w);

    // Rodrigues' formula, with the translation chosen so that `pivot` is a
    // fixed point.
    let m00 = uu + (vv + ww) * cos;
    let m01 = u * v * k - w * sin;
    let m02 = u * w * k + v * sin;
    let m03 = (a * (vv + ww) - u * (b * v + c * w)) * k + (b * w - c * v) * sin;

    let m10 = u * v * k + w * sin;
    let m11 = vv + (uu + ww) * cos;
    let m12 = v * w * k - u * sin;
    let m13 = (b * (uu + ww) - v * (a * u + c * w)) * k + (c * u - a * w) * sin;

    let m20 = u * w * k - v * sin;
    let m21 = v * w * k + u * sin;
    let m22 = ww + (uu + vv) * cos;
    let m23 = (c * (uu + vv) - w * (a * u + b * v)) * k + (a * v - b * u) * sin;

    // `cgmath` matrices are column-major.
    #[rustfmt::skip]
    let ret = Matrix4::new(
        m00, m10, m20, 0.0,
        m01, m11, m21, 0.0,
        m02, m12, m22, 0.0,
        m03, m13, m23, 1.0,
    );
    ret
}

/// Rounds the linear part of `m` to the nearest signed permutation matrix and
/// recomputes the translation so that `pivot` stays fixed.
///
/// `m` must be within half a unit of some composition of quarter turns about
/// `pivot`; otherwise the result is not a rotation.
pub fn snap_quarter_turns(m: Matrix4<Float>, pivot: Point3<Float>) -> Matrix4<Float> {
    let snap = |x: Float| x.round().clamp(-1.0, 1.0);
    let linear = Matrix3::new(
        snap(m.x.x),
        snap(m.x.y),
        snap(m.x.z),
        snap(m.y.x),
        snap(m.y.y),
        snap(m.y.z),
        snap(m.z.x),
        snap(m.z.y),
        snap(m.z.z),
    );
    let p = cgmath::vec3(pivot.x, pivot.y, pivot.z);
    let translation = p - linear * p;
    let mut ret = Matrix4::from(linear);
    ret.w = translation.extend(1.0);
    ret
}
