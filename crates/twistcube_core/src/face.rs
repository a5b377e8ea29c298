//! Faces, twist directions, and twist notation.

use std::fmt;
use std::str::FromStr;

use strum::{EnumIter, IntoEnumIterator};
use twistmath::prelude::*;

use crate::ParseTwistError;

/// Face of a cube puzzle.
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    /// Right (+X).
    R,
    /// Left (-X).
    L,
    /// Up (+Y).
    U,
    /// Down (-Y).
    D,
    /// Front (+Z).
    F,
    /// Back (-Z).
    B,
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl Face {
    /// Returns the face on the given side of an axis.
    pub fn from_axis_sign(axis: Axis, sign: Sign) -> Self {
        use Face::*;

        match (axis, sign) {
            (Axis::X, Sign::Pos) => R,
            (Axis::X, Sign::Neg) => L,
            (Axis::Y, Sign::Pos) => U,
            (Axis::Y, Sign::Neg) => D,
            (Axis::Z, Sign::Pos) => F,
            (Axis::Z, Sign::Neg) => B,
        }
    }

    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        use Face::*;

        match self {
            R | L => Axis::X,
            U | D => Axis::Y,
            F | B => Axis::Z,
        }
    }
    /// Returns which side of its axis the face is on.
    pub fn sign(self) -> Sign {
        use Face::*;

        match self {
            R | U | F => Sign::Pos,
            L | D | B => Sign::Neg,
        }
    }
    /// Returns the outward normal of the face.
    pub fn normal(self) -> SignedAxis {
        SignedAxis::new(self.axis(), self.sign())
    }

    /// Returns the one-letter symbol for the face.
    pub fn symbol(self) -> &'static str {
        use Face::*;

        match self {
            R => "R",
            L => "L",
            U => "U",
            D => "D",
            F => "F",
            B => "B",
        }
    }
}

/// Direction of a quarter turn, as seen looking at the face from outside
/// the puzzle.
#[derive(EnumIter, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TwistDirection {
    /// Clockwise.
    #[default]
    CW,
    /// Counterclockwise.
    CCW,
}
impl fmt::Display for TwistDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwistDirection::CW => Ok(()),
            TwistDirection::CCW => write!(f, "'"),
        }
    }
}
impl TwistDirection {
    /// Returns the reverse direction.
    #[must_use]
    pub fn rev(self) -> Self {
        match self {
            Self::CW => Self::CCW,
            Self::CCW => Self::CW,
        }
    }
    /// Returns the sign of this rotation, according to the mathematical
    /// convention of counterclockwise being positive and clockwise being
    /// negative.
    pub fn sign(self) -> Sign {
        match self {
            Self::CW => Sign::Neg,
            Self::CCW => Sign::Pos,
        }
    }
}

/// Quarter turn of one face layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Twist {
    /// Face that names the turning layer.
    pub face: Face,
    /// Direction of the turn.
    pub direction: TwistDirection,
}
impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.direction)
    }
}
impl FromStr for Twist {
    type Err = ParseTwistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (symbol, direction) = match s.strip_suffix('\'') {
            Some(rest) => (rest, TwistDirection::CCW),
            None => (s, TwistDirection::CW),
        };
        let face = Face::iter()
            .find(|face| face.symbol() == symbol)
            .ok_or_else(|| ParseTwistError(s.to_owned()))?;
        Ok(Twist { face, direction })
    }
}
impl Twist {
    /// Constructs a twist.
    pub const fn new(face: Face, direction: TwistDirection) -> Self {
        Self { face, direction }
    }

    /// Returns an iterator over all 12 twists.
    pub fn iter() -> impl Clone + Iterator<Item = Twist> {
        itertools::iproduct!(Face::iter(), TwistDirection::iter())
            .map(|(face, direction)| Twist { face, direction })
    }

    /// Returns the inverse twist.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            face: self.face,
            direction: self.direction.rev(),
        }
    }

    /// Returns the signed axis around which this twist is a positive
    /// (counterclockwise) quarter turn.
    ///
    /// A clockwise twist is a negative quarter turn around the outward
    /// normal of its face.
    pub fn rotation_axis(self) -> SignedAxis {
        let normal = self.face.normal();
        SignedAxis::new(normal.axis, normal.sign * self.direction.sign())
    }

    /// Returns the twist of `face` that turns positively around
    /// `rotation_axis`, or `None` if `rotation_axis` is not perpendicular to
    /// `face`.
    pub fn from_face_and_rotation(face: Face, rotation_axis: SignedAxis) -> Option<Self> {
        TwistDirection::iter()
            .map(|direction| Twist { face, direction })
            .find(|twist| twist.rotation_axis() == rotation_axis)
    }

    /// Returns the rigid transform for this twist turned by `angle` about
    /// `pivot`. A quarter turn completes the twist.
    pub fn transform(self, pivot: Point3<Float>, angle: Rad<Float>) -> Matrix4<Float> {
        rotation_about_point(pivot, self.rotation_axis().vector(), angle)
    }
}

/// Parses a whitespace-separated sequence of twists such as `R U R' U'`.
pub fn parse_twists(s: &str) -> Result<Vec<Twist>, ParseTwistError> {
    s.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use twistmath::assert_approx_eq;
    use twistmath::cgmath::{Transform, point3};

    use super::*;

    #[test]
    fn test_twist_notation() {
        let twists = parse_twists("R U R' U'  B'\nD").unwrap();
        assert_eq!(
            twists.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
            ["R", "U", "R'", "U'", "B'", "D"],
        );
        assert_eq!(Twist::iter().count(), 12);
        assert_eq!("X".parse::<Twist>(), Err(ParseTwistError("X".to_owned())));
        assert_eq!(parse_twists("R2").map_err(|e| e.to_string()).unwrap_err(), "unknown twist \"R2\"");
    }

    #[test]
    fn test_rotation_axes() {
        let table = [
            ("R", "-X"),
            ("R'", "+X"),
            ("L", "+X"),
            ("L'", "-X"),
            ("U", "-Y"),
            ("U'", "+Y"),
            ("D", "+Y"),
            ("D'", "-Y"),
            ("F", "-Z"),
            ("F'", "+Z"),
            ("B", "+Z"),
            ("B'", "-Z"),
        ];
        for (twist, axis) in table {
            let twist: Twist = twist.parse().unwrap();
            assert_eq!(twist.rotation_axis().to_string(), axis, "{twist}");
            assert_eq!(twist.rev().rotation_axis(), -twist.rotation_axis());
            assert_eq!(
                Twist::from_face_and_rotation(twist.face, twist.rotation_axis()),
                Some(twist),
            );
        }
    }

    #[test]
    fn test_clockwise_from_outside() {
        // Looking at U from above, a clockwise turn takes the front edge to
        // the left.
        let u = Twist::new(Face::U, TwistDirection::CW);
        let m = u.transform(point3(0.0, 0.0, 0.0), QUARTER_TURN);
        assert_approx_eq!(m.transform_point(point3(0.0, 1.0, 1.0)), point3(-1.0, 1.0, 0.0));
    }
}
