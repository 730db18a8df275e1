use glam::{DMat4, DVec3};

/// Tolerance on the dot product for treating a direction as (anti)parallel to +Z
const PARALLEL_EPSILON: f64 = 1e-8;

/// Rotation that maps the canonical +Z axis onto `direction`.
///
/// `direction` does not need to be normalized but must be non-zero.
/// When the direction points straight down the cross product degenerates, so the
/// half turn is taken about +X.
pub fn align_z_to(direction: DVec3) -> DMat4 {
    let d = direction.normalize();
    let dot = DVec3::Z.dot(d).clamp(-1.0, 1.0);

    if (dot - 1.0).abs() < PARALLEL_EPSILON {
        return DMat4::IDENTITY;
    }
    if (dot + 1.0).abs() < PARALLEL_EPSILON {
        return DMat4::from_axis_angle(DVec3::X, std::f64::consts::PI);
    }

    let axis = DVec3::Z.cross(d).normalize();
    DMat4::from_axis_angle(axis, dot.acos())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_up_is_identity() {
        assert_eq!(align_z_to(DVec3::new(0.0, 0.0, 5.0)), DMat4::IDENTITY);
    }

    #[test]
    fn test_down_flips_about_x() {
        let rot = align_z_to(DVec3::new(0.0, 0.0, -2.0));
        assert_close(rot.transform_vector3(DVec3::Z), -DVec3::Z);
        // X is the rotation axis, so it stays put
        assert_close(rot.transform_vector3(DVec3::X), DVec3::X);
    }

    #[test]
    fn test_general_direction() {
        let dir = DVec3::new(1.0, 2.0, -3.0);
        let rot = align_z_to(dir);
        assert_close(rot.transform_vector3(DVec3::Z), dir.normalize());
    }

    #[test]
    fn test_horizontal_direction() {
        let rot = align_z_to(DVec3::Y);
        assert_close(rot.transform_vector3(DVec3::Z), DVec3::Y);
    }

    #[test]
    fn test_near_vertical_overshoot_does_not_nan() {
        let rot = align_z_to(DVec3::new(1e-12, 0.0, 1.0));
        assert!(!rot.is_nan());
    }
}
