use std::fmt;

use cgmath::{InnerSpace, Vector3};

use crate::{Float, Sign, approx_cmp::approx_eq};

/// 3-dimensional axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let i = *self as usize;
        write!(f, "{}", &crate::AXIS_NAMES[i..=i])
    }
}
impl Axis {
    /// Returns an iterator over all axes.
    pub fn iter() -> impl Clone + Iterator<Item = Axis> {
        [Axis::X, Axis::Y, Axis::Z].into_iter()
    }

    /// Returns the unit vector along this axis.
    pub fn unit_vec3(self) -> Vector3<Float> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }

    /// Returns the component of `v` along this axis.
    pub fn component(self, v: Vector3<Float>) -> Float {
        v[self as usize]
    }
}

/// Axis along with a direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SignedAxis {
    /// Unsigned axis.
    pub axis: Axis,
    /// Direction along the axis.
    pub sign: Sign,
}
impl fmt::Display for SignedAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Neg => '-',
            Sign::Pos => '+',
        };
        write!(f, "{sign}{}", self.axis)
    }
}
impl std::ops::Neg for SignedAxis {
    type Output = SignedAxis;

    fn neg(self) -> Self::Output {
        SignedAxis {
            axis: self.axis,
            sign: -self.sign,
        }
    }
}
impl SignedAxis {
    /// The six signed axes, in the order `+X, -X, +Y, -Y, +Z, -Z`.
    pub const ALL: [SignedAxis; 6] = [
        SignedAxis::new(Axis::X, Sign::Pos),
        SignedAxis::new(Axis::X, Sign::Neg),
        SignedAxis::new(Axis::Y, Sign::Pos),
        SignedAxis::new(Axis::Y, Sign::Neg),
        SignedAxis::new(Axis::Z, Sign::Pos),
        SignedAxis::new(Axis::Z, Sign::Neg),
    ];

    /// Constructs a signed axis.
    pub const fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }

    /// Returns the unit vector pointing along the signed axis.
    pub fn vector(self) -> Vector3<Float> {
        self.axis.unit_vec3() * self.sign.float()
    }

    /// Returns the signed axis that is approximately equal to `v`, or `None`
    /// if `v` is not a unit vector along a principal axis.
    pub fn from_vector(v: Vector3<Float>) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|signed_axis| approx_eq(&signed_axis.vector(), &v))
    }

    /// Returns the signed axis closest in direction to `v`, or `None` if `v`
    /// is approximately zero.
    pub fn nearest(v: Vector3<Float>) -> Option<Self> {
        if v.magnitude2() < crate::EPSILON {
            return None;
        }
        let axis = Axis::iter().max_by(|&a, &b| {
            a.component(v)
                .abs()
                .total_cmp(&b.component(v).abs())
        })?;
        Some(Self::new(axis, Sign::of(axis.component(v))?))
    }

    /// Returns the cross product of two signed axes, or `None` if they are
    /// parallel.
    pub fn cross(self, other: SignedAxis) -> Option<Self> {
        Self::nearest(self.vector().cross(other.vector()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_signed_axis() {
        assert_eq!(
            SignedAxis::nearest(Vector3::new(0.2, -3.0, 1.0)),
            Some(SignedAxis::new(Axis::Y, Sign::Neg)),
        );
        assert_eq!(SignedAxis::nearest(Vector3::new(0.0, 0.0, 0.0)), None);
    }

    #[test]
    fn test_signed_axis_cross() {
        let x = SignedAxis::new(Axis::X, Sign::Pos);
        let y = SignedAxis::new(Axis::Y, Sign::Pos);
        assert_eq!(y.cross(x), Some(SignedAxis::new(Axis::Z, Sign::Neg)));
        assert_eq!(x.cross(-x), None);
    }

    #[test]
    fn test_signed_axis_from_vector() {
        assert_eq!(
            SignedAxis::from_vector(Vector3::new(0.0, -1.0, 0.0)),
            Some(SignedAxis::new(Axis::Y, Sign::Neg)),
        );
        assert_eq!(SignedAxis::from_vector(Vector3::new(0.0, -0.9, 0.0)), None);
        assert_eq!(SignedAxis::to_string(&SignedAxis::ALL[5]), "-Z");
    }
}
