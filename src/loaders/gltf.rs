use anyhow::{Context, Result};
use glam::{DMat4, DVec3, Mat4};
use std::path::{Path, PathBuf};

use super::templates::TemplateSource;
use crate::config::pendant_asset_stem;
use crate::error::{ClusterError, ClusterResult};
use crate::types::Mesh;

/// Loads pendant models from `<root>/<Stem>.glb` vendor assets
#[derive(Debug, Clone)]
pub struct GltfTemplateSource {
    root: PathBuf,
}

impl GltfTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, model: &str) -> Option<PathBuf> {
        pendant_asset_stem(model).map(|stem| self.root.join(format!("{stem}.glb")))
    }
}

impl TemplateSource for GltfTemplateSource {
    fn load(&self, model: &str) -> ClusterResult<Vec<Mesh>> {
        let path = self
            .path_for(model)
            .ok_or_else(|| ClusterError::UnknownPendantModel(model.to_string()))?;

        load_gltf_meshes(&path).map_err(|e| ClusterError::Template {
            model: model.to_string(),
            source: e.into(),
        })
    }
}

/// Converts a glTF point (meters, Y-up) into the internal frame (millimeters, Z-up)
fn to_internal(p: DVec3) -> DVec3 {
    DVec3::new(p.x, p.z, p.y) * 1000.0
}

/// Loads every triangle primitive of a glTF/GLB file as one mesh, baking node transforms
pub fn load_gltf_meshes(path: impl AsRef<Path>) -> Result<Vec<Mesh>> {
    let path = path.as_ref();
    log::debug!("Loading glTF file: {:?}", path);

    let (gltf, buffers, _images) =
        gltf::import(path).with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    let mut meshes = Vec::new();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &DMat4::IDENTITY, &mut meshes)?;
        }
    }

    log::debug!("Extracted {} meshes from {:?}", meshes.len(), path);
    Ok(meshes)
}

/// Recursively processes glTF nodes
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &DMat4,
    meshes: &mut Vec<Mesh>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix()).as_dmat4();
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, meshes)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, meshes)?;
    }

    Ok(())
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &DMat4,
    meshes: &mut Vec<Mesh>,
) -> Result<()> {
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "Skipping {:?} primitive in mesh {:?}",
                primitive.mode(),
                mesh.name()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

        let vertices: Vec<DVec3> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(|pos| to_internal(transform.transform_point3(DVec3::from(pos.map(f64::from)))))
            .collect();

        if vertices.is_empty() {
            continue;
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..vertices.len() as u32).collect(),
        };

        anyhow::ensure!(
            indices.len() % 3 == 0,
            "Triangle primitive in mesh {:?} has {} indices",
            mesh.name(),
            indices.len()
        );
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            anyhow::bail!(
                "Index {} out of range for {} vertices in mesh {:?}",
                bad,
                vertices.len(),
                mesh.name()
            );
        }

        let mut out = Mesh {
            vertices,
            ..Mesh::default()
        };
        // Swapping Y and Z mirrors the geometry, so winding flips to stay outward-facing
        for tri in indices.chunks_exact(3) {
            out.add_triangle(tri[0], tri[2], tri[1]);
        }
        out.compute_normals();
        meshes.push(out);
    }

    Ok(())
}
