//! Translation of drag gestures into twists.

use twistmath::prelude::*;

use crate::{Face, Twist};

/// Default maximum angle, in radians, between a drag and the nearest axis.
pub const DEFAULT_AMBIGUITY_TOLERANCE: Float = 0.8;

/// Returns the twist that a drag along `drag` across a face with outward
/// normal `normal` should perform, or `None` if the gesture is ambiguous.
///
/// Both vectors are in the puzzle's local frame. The drag snaps to the
/// nearest signed axis `d`; the gesture is rejected if that axis is more than
/// `tolerance` radians away or is tied with the runner-up. `normal` must be
/// a principal axis perpendicular to `d`.
///
/// The resulting twist is a quarter turn about `normal × d`, which moves the
/// touched face in the direction of the drag. The sign of `normal` picks
/// which face of the pair names the twist.
pub fn resolve_twist(drag: Vector3<Float>, normal: Vector3<Float>, tolerance: Float) -> Option<Twist> {
    if !is_approx_nonzero(drag.magnitude()) {
        log::trace!("rejected zero-length drag");
        return None;
    }

    let mut angles = SignedAxis::ALL.map(|axis| (axis, drag.angle(axis.vector()).0));
    angles.sort_by(|(_, a), (_, b)| a.total_cmp(b));
    let [(drag_axis, best), (_, runner_up), ..] = angles;
    if best > tolerance {
        log::trace!("rejected drag {drag:?}: {best} rad from nearest axis {drag_axis}");
        return None;
    }
    if approx_eq(&best, &runner_up) {
        log::trace!("rejected drag {drag:?}: ambiguous between axes");
        return None;
    }

    let Some(normal_axis) = SignedAxis::from_vector(normal) else {
        log::trace!("rejected normal {normal:?}: not a principal axis");
        return None;
    };
    if normal_axis.axis == drag_axis.axis {
        log::trace!("rejected normal {normal_axis}: parallel to drag {drag_axis}");
        return None;
    }

    let rotation_axis = normal_axis.cross(drag_axis)?;
    let face = Face::from_axis_sign(rotation_axis.axis, normal_axis.sign);
    let twist = Twist::from_face_and_rotation(face, rotation_axis);
    log::trace!("resolved drag {drag_axis} on face {normal_axis} to {twist:?}");
    twist
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use twistmath::cgmath::vec3;

    use super::*;

    const TOL: Float = DEFAULT_AMBIGUITY_TOLERANCE;

    fn resolve(drag: [Float; 3], normal: [Float; 3]) -> Option<String> {
        resolve_twist(drag.into(), normal.into(), TOL).map(|t| t.to_string())
    }

    #[test]
    fn test_drag_right_on_top_face() {
        assert_eq!(resolve([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]).as_deref(), Some("F"));
        assert_eq!(resolve([7.5, 0.4, -1.2], [0.0, 1.0, 0.0]).as_deref(), Some("F"));
        assert_eq!(resolve([1.0, 0.0, 0.0], [0.0, -1.0, 0.0]).as_deref(), Some("B"));
        assert_eq!(resolve([-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]).as_deref(), Some("F'"));
    }

    #[test]
    fn test_every_combination_moves_face_along_drag() {
        let mut seen = std::collections::HashSet::new();
        for d in SignedAxis::ALL {
            for n in SignedAxis::ALL {
                let twist = resolve_twist(d.vector(), n.vector(), TOL);
                if n.axis == d.axis {
                    assert_eq!(twist, None);
                    continue;
                }
                let twist = twist.unwrap();
                // Velocity of the touched face's center under the rotation.
                let velocity = twist.rotation_axis().vector().cross(n.vector());
                twistmath::assert_approx_eq!(velocity, d.vector());
                seen.insert(twist);
            }
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn test_ambiguous_drags() {
        // Diagonal between two axes.
        assert_eq!(resolve([1.0, 0.0, 1.0], [0.0, 1.0, 0.0]), None);
        // Equally far from every positive axis.
        assert_eq!(resolve([1.0, 1.0, 1.0], [0.0, 1.0, 0.0]), None);
        // Outside tolerance.
        assert_eq!(resolve([1.0, 0.9, 0.8], [0.0, 1.0, 0.0]), None);
        assert_eq!(resolve([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]), None);
    }

    #[test]
    fn test_bad_normals() {
        assert_eq!(resolve([1.0, 0.0, 0.0], [1.0, 0.0, 0.0]), None);
        assert_eq!(resolve([1.0, 0.0, 0.0], [0.0, 0.7, 0.7]), None);
        assert!(resolve_twist(vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0 + 1e-9, 0.0), TOL).is_some());
    }
}
