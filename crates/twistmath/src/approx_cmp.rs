//! Approximate comparison functions that automatically use [`EPSILON`].

pub use approx::AbsDiffEq;

use crate::{EPSILON, Float};

/// Compares two values, but considers them equal if they are separated by
/// less than `EPSILON`.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float>>(a: &T, b: &T) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

/// Returns whether one number is less than another by at least `EPSILON`.
pub fn approx_lt(a: Float, b: Float) -> bool {
    a < b && !approx_eq(&a, &b)
}
/// Returns whether one number is greater than another by at least `EPSILON`.
pub fn approx_gt(a: Float, b: Float) -> bool {
    a > b && !approx_eq(&a, &b)
}

/// Returns whether `x` has an absolute value greater than `EPSILON`.
pub fn is_approx_nonzero(x: Float) -> bool {
    !approx_eq(&x, &0.0)
}

/// Returns whether every component of `a` is within `tolerance` of the
/// corresponding component of `b`.
///
/// Unlike [`approx_eq()`], the tolerance is inclusive and caller-supplied.
pub fn within_box(a: cgmath::Point3<Float>, b: cgmath::Point3<Float>, tolerance: Float) -> bool {
    (a.x - b.x).abs() <= tolerance
        && (a.y - b.y).abs() <= tolerance
        && (a.z - b.z).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use cgmath::point3;

    use super::*;

    #[test]
    fn test_approx_comparisons() {
        assert!(approx_eq(&1.0, &(1.0 + EPSILON / 2.0)));
        assert!(approx_lt(1.0, 1.1));
        assert!(approx_gt(2.0, 1.0));
        assert!(!approx_lt(1.0, 1.0 + EPSILON / 2.0));
        assert!(!is_approx_nonzero(EPSILON / 10.0));
    }

    #[test]
    fn test_within_box_is_inclusive() {
        let a = point3(0.0, 0.0, 0.0);
        assert!(within_box(a, point3(5.0, -5.0, 5.0), 5.0));
        assert!(!within_box(a, point3(5.0, -5.0, 5.1), 5.0));
    }
}
