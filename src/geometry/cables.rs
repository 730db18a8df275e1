use glam::DMat4;

use super::placement::PendantPlacement;
use super::primitives::make_cylinder;
use crate::config::{CABLE_RADIUS_MM, CABLE_SEGMENTS};
use crate::math::align_z_to;
use crate::types::Mesh;

/// Segments shorter than this produce no cable
pub const MIN_CABLE_LENGTH: f64 = 1e-6;

/// One cable per placement, running from the canopy point to the pendant's suspension point
pub fn build_cables(placements: &[PendantPlacement]) -> Vec<Mesh> {
    placements
        .iter()
        .filter_map(|placement| {
            let direction = placement.end - placement.start;
            let length = direction.length();
            if length < MIN_CABLE_LENGTH {
                log::debug!(
                    "Skipping degenerate cable for '{}' at {:?}",
                    placement.pendant.model,
                    placement.start
                );
                return None;
            }

            let mut cable = make_cylinder(CABLE_RADIUS_MM, length, CABLE_SEGMENTS);
            cable.transform(&(DMat4::from_translation(placement.start) * align_z_to(direction)));
            Some(cable)
        })
        .collect()
}
