use std::f64::consts::TAU;

use crate::config::SHADE_MATERIAL_PREFIX;

/// Length in millimeters covered by one UV unit
pub const UV_SCALE_MM: f64 = 500.0;

/// Texture coordinate projection, picked from the material key alone
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UvMapping {
    Planar,
    Cylindrical,
}

impl UvMapping {
    pub fn for_material(key: &str) -> Self {
        if key.starts_with(SHADE_MATERIAL_PREFIX) {
            UvMapping::Cylindrical
        } else {
            UvMapping::Planar
        }
    }

    /// UV for a point in the internal millimeter, Z-up frame
    pub fn project(self, x: f64, y: f64, z: f64) -> [f32; 2] {
        let (u, v) = match self {
            UvMapping::Planar => (x / UV_SCALE_MM + 0.5, y / UV_SCALE_MM + 0.5),
            UvMapping::Cylindrical => (y.atan2(x) / TAU + 0.5, z / UV_SCALE_MM + 0.5),
        };
        [u as f32, v as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_from_key() {
        assert_eq!(UvMapping::for_material("shade_blonde"), UvMapping::Cylindrical);
        assert_eq!(UvMapping::for_material("canopy_black"), UvMapping::Planar);
        assert_eq!(UvMapping::for_material("cable_shade_"), UvMapping::Planar);
    }

    #[test]
    fn test_cylindrical_quarter_turn() {
        let uv = UvMapping::Cylindrical.project(0.0, 100.0, 250.0);
        assert!((uv[0] - 0.75).abs() < 1e-6);
        assert!((uv[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cylindrical_seam_at_negative_x() {
        let uv = UvMapping::Cylindrical.project(-10.0, 0.0, 0.0);
        assert!((uv[0] - 1.0).abs() < 1e-6);
        assert!((uv[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_planar_ignores_height() {
        let uv = UvMapping::Planar.project(250.0, -250.0, 9999.0);
        assert_eq!(uv, [1.0, 0.0]);
    }
}
