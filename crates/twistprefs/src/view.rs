use serde::{Deserialize, Serialize};
use twistcube_core::twistmath::cgmath::{Deg, InnerSpace, Quaternion, Rotation3, Vector3, vec3};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewPreferences {
    /// Rotation of the puzzle around the vertical axis, in degrees.
    pub yaw_degrees: f64,
    /// Rotation of the puzzle toward the viewer, in degrees, about the
    /// puzzle's own `(-1, 0, 1)` axis.
    pub tilt_degrees: f64,
}
impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            yaw_degrees: -45.0,
            tilt_degrees: -25.0,
        }
    }
}
impl ViewPreferences {
    /// Returns the rotation from the puzzle's local frame to world space.
    ///
    /// The tilt is applied in the puzzle's frame before the yaw, so after the
    /// default yaw the tilt axis lies along the screen's horizontal and the
    /// default orientation shows the U, F, and R faces equally.
    pub fn orientation(&self) -> Quaternion<f64> {
        let yaw = Quaternion::from_angle_y(Deg(self.yaw_degrees));
        let tilt_axis: Vector3<f64> = vec3(-1.0, 0.0, 1.0).normalize();
        let tilt = Quaternion::from_axis_angle(tilt_axis, Deg(self.tilt_degrees));
        yaw * tilt
    }
}

#[cfg(test)]
mod tests {
    use twistcube_core::twistmath::assert_approx_eq;
    use twistcube_core::twistmath::cgmath::Rotation;

    use super::*;

    #[test]
    fn test_zero_orientation_is_identity() {
        let view = ViewPreferences {
            yaw_degrees: 0.0,
            tilt_degrees: 0.0,
        };
        let v = vec3(1.0, 2.0, 3.0);
        assert_approx_eq!(view.orientation().rotate_vector(v), v);
    }

    #[test]
    fn test_default_orientation_shows_three_faces() {
        let q = ViewPreferences::default().orientation();
        // The viewer looks down -Z, so a visible face has an outward normal
        // with positive world Z.
        for (axis, visible) in [
            (Vector3::unit_x(), true),
            (Vector3::unit_y(), true),
            (Vector3::unit_z(), true),
            (-Vector3::unit_x(), false),
        ] {
            assert_eq!(q.rotate_vector(axis).z > 0.0, visible, "{axis:?}");
        }
        // R and F face the viewer at the same angle, and U points up.
        let r = q.rotate_vector(Vector3::unit_x());
        let f = q.rotate_vector(Vector3::unit_z());
        assert_approx_eq!(r.z, f.z);
        assert_approx_eq!(r.y, f.y);
        assert!(q.rotate_vector(Vector3::unit_y()).y > 0.0);
    }

    #[test]
    fn test_tilt_axis_is_screen_horizontal() {
        let q = ViewPreferences::default().orientation();
        let axis = q.rotate_vector(vec3(-1.0, 0.0, 1.0).normalize());
        assert_approx_eq!(axis, vec3(-1.0, 0.0, 0.0));
    }
}
