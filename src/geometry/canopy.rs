use glam::DVec3;
use std::f64::consts::TAU;

use super::primitives::make_cylinder;
use crate::config::{CanopySpec, ClusterType, CANOPY_SEGMENTS};
use crate::types::Mesh;

/// Canopy shell meshes plus the ordered cable attachment points on its underside
#[derive(Clone, Debug)]
pub struct Canopy {
    pub bottom: Mesh,
    pub top: Mesh,
    pub attachment_points: Vec<DVec3>,
}

/// Builds the two-part canopy hanging from the ceiling plane at z = 0.
///
/// Ring points come first in circumferential order; for center topologies the
/// single center point is always last.
pub fn build_canopy(spec: &CanopySpec, pendants: usize, topology: ClusterType) -> Canopy {
    let height = spec.height_mm;
    let plate = spec.plate_thickness_mm;

    let mut bottom = make_cylinder(spec.outer_radius_mm, plate, CANOPY_SEGMENTS);
    bottom.translate(DVec3::new(0.0, 0.0, -height));

    let mut top = make_cylinder(spec.inner_radius_mm + plate, height - plate, CANOPY_SEGMENTS);
    top.translate(DVec3::new(0.0, 0.0, -(height - plate)));

    let ring_radius = spec.inner_radius_mm - spec.cable_offset_mm;
    let base_z = -height;

    let ring_count = if topology.has_center() {
        pendants.saturating_sub(1)
    } else {
        pendants
    };

    let mut attachment_points: Vec<DVec3> = (0..ring_count)
        .map(|i| {
            let angle = TAU * i as f64 / ring_count as f64;
            DVec3::new(ring_radius * angle.cos(), ring_radius * angle.sin(), base_z)
        })
        .collect();

    if topology.has_center() {
        attachment_points.push(DVec3::new(0.0, 0.0, base_z));
    }

    log::debug!(
        "Canopy {:?}: {} attachment points on r={} mm",
        topology,
        attachment_points.len(),
        ring_radius
    );

    Canopy {
        bottom,
        top,
        attachment_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanopySize;

    #[test]
    fn test_ring_points_on_circle() {
        let spec = CanopySize::M.spec();
        let canopy = build_canopy(&spec, 5, ClusterType::Ring);

        assert_eq!(canopy.attachment_points.len(), 5);
        for p in &canopy.attachment_points {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!((r - 250.0).abs() < 1e-9);
            assert_eq!(p.z, -40.0);
        }
    }

    #[test]
    fn test_ring_with_center_appends_center_last() {
        let spec = CanopySize::S.spec();
        let canopy = build_canopy(&spec, 4, ClusterType::RingWithCenter);

        assert_eq!(canopy.attachment_points.len(), 4);
        assert_eq!(canopy.attachment_points[3], DVec3::new(0.0, 0.0, -40.0));
        for p in &canopy.attachment_points[..3] {
            assert!((p.truncate().length() - 110.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_pendant_center_only() {
        let spec = CanopySize::L.spec();
        let canopy = build_canopy(&spec, 1, ClusterType::RandomRing);
        assert_eq!(canopy.attachment_points, vec![DVec3::new(0.0, 0.0, -40.0)]);
    }

    #[test]
    fn test_shell_stacks_under_ceiling() {
        let spec = CanopySize::M.spec();
        let canopy = build_canopy(&spec, 3, ClusterType::Ring);

        let bottom = canopy.bottom.bounds().unwrap();
        assert!((bottom.min.z + 40.0).abs() < 1e-9);
        assert!((bottom.max.z + 38.5).abs() < 1e-9);
        assert!((bottom.max.x - 300.0).abs() < 1e-9);

        let top = canopy.top.bounds().unwrap();
        assert!((top.min.z + 38.5).abs() < 1e-9);
        assert!(top.max.z.abs() < 1e-9);
        assert!((top.max.x - 281.5).abs() < 1e-9);
    }
}
