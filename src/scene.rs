use crate::config::ClusterConfig;
use crate::error::ClusterResult;
use crate::geometry::{build_cables, build_canopy, plan_placements, Canopy, PendantPlacement};
use crate::loaders::TemplateStore;
use crate::types::{Mesh, Scene};

/// Orders canopy, cables and pendant meshes into mesh groups.
///
/// Fixed order: canopy bottom, canopy top, cables in placement order, then each
/// placement's pendant meshes. Material keys are registered first-seen over that walk.
pub fn assemble_scene(
    config: &ClusterConfig,
    canopy: Canopy,
    cables: Vec<Mesh>,
    placements: Vec<PendantPlacement>,
) -> Scene {
    let mut scene = Scene::default();

    scene.push(canopy.bottom, &config.canopy.appearance);
    scene.push(canopy.top, &config.canopy.appearance);

    for cable in cables {
        scene.push(cable, &config.cable.appearance);
    }

    for placement in placements {
        for mesh in placement.meshes {
            scene.push(mesh, &placement.pendant.appearance);
        }
    }

    scene
}

/// Runs the geometry pipeline for one configuration
pub fn build_scene(config: &ClusterConfig, templates: &TemplateStore) -> ClusterResult<Scene> {
    let topology = config.resolved_topology();
    let canopy = build_canopy(&config.canopy.size.spec(), config.num_pendants(), topology);

    let placements = plan_placements(config, &canopy.attachment_points, templates)?;
    let cables = build_cables(&placements);

    log::debug!(
        "Built {} placements and {} cables ({:?})",
        placements.len(),
        cables.len(),
        topology
    );

    Ok(assemble_scene(config, canopy, cables, placements))
}
