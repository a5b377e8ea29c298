//! 3D rotation, comparison, and indexing primitives for cube puzzles.

pub use {approx, cgmath};

/// Floating-point type used for geometry.
pub type Float = f64;

/// Small floating-point value used for comparisons.
pub const EPSILON: Float = 0.000001;

/// Names for the three axes.
pub const AXIS_NAMES: &str = "XYZ";

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

/// Panics in debug builds and logs an error in release builds.
#[macro_export]
macro_rules! debug_panic {
    ($($tok:tt)*) => {
        match cfg!(debug_assertions) {
            true => panic!($($tok)*),
            false => $crate::log::error!($($tok)*),
        }
    };
}

#[doc(hidden)]
pub use log;

#[macro_use]
pub mod collections;

pub mod approx_cmp;
mod axis;
pub mod rotation;
mod sign;

pub use axis::{Axis, SignedAxis};
pub use sign::Sign;

/// Commonly used types, traits, functions, and constants.
pub mod prelude {
    pub use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3};

    pub use crate::approx_cmp::*;
    pub use crate::axis::{Axis, SignedAxis};
    pub use crate::collections::{GenericVec, IndexNewtype, IndexOutOfRange, IndexOverflow};
    pub use crate::rotation::*;
    pub use crate::sign::Sign;
    pub use crate::{AXIS_NAMES, EPSILON, Float};
}
pub use prelude::*;
