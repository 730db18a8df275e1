use glam::{DMat4, DVec3};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use std::sync::Arc;

use crate::config::{ClusterConfig, ClusterType, PendantConfig};
use crate::error::{ClusterError, ClusterResult};
use crate::loaders::{PendantTemplate, TemplateStore};
use crate::types::Mesh;

/// One pendant bound to one attachment point, with its meshes moved into place
#[derive(Clone, Debug)]
pub struct PendantPlacement {
    pub pendant: PendantConfig,
    /// Cable origin on the canopy
    pub start: DVec3,
    /// Suspension point of the pendant (its model origin)
    pub end: DVec3,
    pub drop: f64,
    pub twist: f64,
    pub meshes: Vec<Mesh>,
}

/// Vertical chain layout: one cumulative drop per pendant plus the shared gap
#[derive(Clone, Debug, PartialEq)]
pub struct DropLayout {
    pub drops: Vec<f64>,
    pub gap: f64,
    pub slack: f64,
}

/// Spreads the slack left between first and total drop evenly over the gaps
/// between consecutive pendants.
///
/// `extents` holds `(top, bottom)` per pendant in chain order. Negative slack is
/// passed through as negative gaps.
pub fn solve_drops(first_drop: f64, total_drop: f64, extents: &[(f64, f64)]) -> DropLayout {
    let n = extents.len();
    let (Some(&(first_top, _)), Some(&(_, last_bottom))) = (extents.first(), extents.last()) else {
        return DropLayout {
            drops: Vec::new(),
            gap: 0.0,
            slack: total_drop - first_drop,
        };
    };

    let clearances: Vec<f64> = extents
        .windows(2)
        .map(|pair| pair[0].1 + pair[1].0)
        .collect();

    let occupied = first_top + last_bottom + clearances.iter().sum::<f64>();
    let slack = total_drop - first_drop - occupied;
    let gap = if n > 1 { slack / (n - 1) as f64 } else { 0.0 };

    let mut drops = Vec::with_capacity(n);
    drops.push(first_drop);
    for clearance in clearances {
        let previous = drops[drops.len() - 1];
        drops.push(previous + clearance + gap);
    }

    DropLayout { drops, gap, slack }
}

/// Attachment-point index for each pendant, in config order.
///
/// Ring topologies hand out points by increasing polar angle; random rings then
/// shuffle that order with the planning rng.
pub fn assignment_order(points: &[DVec3], topology: ClusterType, rng: &mut StdRng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    if points.len() <= 1 {
        return order;
    }

    // Stable sort: the center point ties with the ring point at angle 0 and stays behind it
    order.sort_by(|&a, &b| {
        let angle_a = points[a].y.atan2(points[a].x);
        let angle_b = points[b].y.atan2(points[b].x);
        angle_a.total_cmp(&angle_b)
    });

    if topology == ClusterType::RandomRing {
        order.shuffle(rng);
    }
    order
}

/// Places every pendant under an attachment point and returns the placements in
/// config order.
///
/// The seeded rng lives only for this call: identical configs yield identical
/// shuffles and twists.
pub fn plan_placements(
    config: &ClusterConfig,
    attachment_points: &[DVec3],
    templates: &TemplateStore,
) -> ClusterResult<Vec<PendantPlacement>> {
    let n = config.num_pendants();
    if attachment_points.len() < n {
        return Err(ClusterError::NoAttachmentPoints {
            points: attachment_points.len(),
            pendants: n,
        });
    }

    let resolved: Vec<Arc<PendantTemplate>> = config
        .pendants
        .iter()
        .map(|p| templates.get(&p.model))
        .collect::<ClusterResult<_>>()?;

    let extents: Vec<(f64, f64)> = resolved
        .iter()
        .map(|t| (t.top_extent, t.bottom_extent))
        .collect();

    let layout = solve_drops(
        config.layout.first_drop_mm as f64,
        config.layout.total_drop_mm as f64,
        &extents,
    );
    if layout.slack < 0.0 {
        // Accepted as-is: overlapping pendants are a product question, not a hard error
        log::warn!(
            "Total drop {} mm is {:.1} mm short for {} pendants; gaps go negative ({:.1} mm)",
            config.layout.total_drop_mm,
            -layout.slack,
            n,
            layout.gap
        );
    }

    let mut rng = StdRng::seed_from_u64(config.random_seed);
    let points = &attachment_points[..n];
    let order = assignment_order(points, config.resolved_topology(), &mut rng);

    let placements = config
        .pendants
        .iter()
        .zip(&resolved)
        .enumerate()
        .map(|(i, (pendant, template))| {
            let start = points[order[i]];
            let drop = layout.drops[i];
            let end = DVec3::new(start.x, start.y, start.z - drop);
            let twist = rng.random::<f64>() * TAU;

            let transform = DMat4::from_translation(end) * DMat4::from_rotation_z(twist);
            let meshes = template
                .meshes
                .iter()
                .map(|m| {
                    let mut placed = m.clone();
                    placed.transform(&transform);
                    placed
                })
                .collect();

            PendantPlacement {
                pendant: pendant.clone(),
                start,
                end,
                drop,
                twist,
                meshes,
            }
        })
        .collect();

    Ok(placements)
}
