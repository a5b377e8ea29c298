//! Sign enum.

use std::ops::{Mul, Neg};

/// Positive or negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    Pos = 1,
}
impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Mul<Sign> for Sign {
    type Output = Sign;
    fn mul(self, rhs: Sign) -> Sign {
        match self {
            Sign::Neg => -rhs,
            Sign::Pos => rhs,
        }
    }
}
impl Sign {
    /// Returns the sign of a number, or `None` if it is approximately zero.
    pub fn of(x: crate::Float) -> Option<Self> {
        if crate::approx_cmp::approx_gt(x, 0.0) {
            Some(Sign::Pos)
        } else if crate::approx_cmp::approx_lt(x, 0.0) {
            Some(Sign::Neg)
        } else {
            None
        }
    }

    /// Returns an integer representation of the sign (either -1 or 1).
    pub const fn int(self) -> i32 {
        match self {
            Sign::Neg => -1,
            Sign::Pos => 1,
        }
    }
    /// Returns a floating-point representation of the sign (either -1.0 or
    /// 1.0).
    pub const fn float(self) -> crate::Float {
        self.int() as crate::Float
    }
}
