use gltf::json;
use json::validation::Checked::Valid;
use json::validation::USize64;
use std::collections::{BTreeMap, HashMap};

use super::uv::UvMapping;
use crate::config::material_preset;
use crate::error::{ClusterError, ClusterResult};
use crate::types::{Mesh, MeshGroup};

// === Container constants ===

pub const GLB_MAGIC: &[u8; 4] = b"glTF";
pub const GLB_VERSION: u32 = 2;
pub const GLB_HEADER_BYTES: usize = 12;
pub const GLB_CHUNK_HEADER_BYTES: usize = 8;
pub const GLB_JSON_CHUNK_TYPE: &[u8; 4] = b"JSON";
pub const GLB_BIN_CHUNK_TYPE: &[u8; 4] = b"BIN\0";

const MM_PER_METER: f64 = 1000.0;

/// Pads `bytes` with `fill` up to the next multiple of four
pub fn pad_to_4(bytes: &mut Vec<u8>, fill: u8) {
    let padding = (4 - bytes.len() % 4) % 4;
    bytes.resize(bytes.len() + padding, fill);
}

/// Position of one sub-buffer inside the shared binary buffer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ByteSpan {
    pub offset: usize,
    pub length: usize,
}

/// The shared binary buffer as a list of padded spans with running offsets
#[derive(Debug, Default)]
pub struct BinaryBuffer {
    spans: Vec<Vec<u8>>,
    byte_length: usize,
}

impl BinaryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sub-buffer, zero-padded to four bytes, and returns where it landed
    pub fn push(&mut self, mut bytes: Vec<u8>) -> ByteSpan {
        pad_to_4(&mut bytes, 0);
        let span = ByteSpan {
            offset: self.byte_length,
            length: bytes.len(),
        };
        self.byte_length += bytes.len();
        self.spans.push(bytes);
        span
    }

    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.spans.concat()
    }
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn u32_bytes(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Flat vertex and index arrays for one primitive, already in output units
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshArrays {
    /// Meters, Y-up
    pub positions: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshArrays {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Component-wise min and max of the positions
    pub fn position_bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for p in self.positions.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        (min, max)
    }
}

/// Converts a mesh into output arrays.
///
/// UVs are projected from the millimeter, Z-up coordinates; positions are then
/// emitted as `(x, z, y) / 1000`.
pub fn mesh_to_arrays(mesh: &Mesh, mapping: UvMapping) -> MeshArrays {
    let mut arrays = MeshArrays {
        positions: Vec::with_capacity(mesh.vertices.len() * 3),
        uvs: Vec::with_capacity(mesh.vertices.len() * 2),
        indices: mesh.triangle_indices(),
    };

    for v in &mesh.vertices {
        arrays.positions.extend([
            (v.x / MM_PER_METER) as f32,
            (v.z / MM_PER_METER) as f32,
            (v.y / MM_PER_METER) as f32,
        ]);
        arrays.uvs.extend(mapping.project(v.x, v.y, v.z));
    }

    arrays
}

// === glTF JSON document ===

fn push_view(
    root: &mut json::Root,
    span: ByteSpan,
    target: json::buffer::Target,
) -> json::Index<json::buffer::View> {
    root.push(json::buffer::View {
        buffer: json::Index::new(0),
        byte_length: USize64::from(span.length),
        byte_offset: Some(USize64::from(span.offset)),
        byte_stride: None,
        target: Some(Valid(target)),
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    })
}

fn push_accessor(
    root: &mut json::Root,
    view: json::Index<json::buffer::View>,
    count: usize,
    component: json::accessor::ComponentType,
    kind: json::accessor::Type,
    bounds: Option<([f32; 3], [f32; 3])>,
) -> json::Index<json::Accessor> {
    let (min, max) = match bounds {
        Some((min, max)) => (
            Some(json::Value::from(min.to_vec())),
            Some(json::Value::from(max.to_vec())),
        ),
        None => (None, None),
    };
    root.push(json::Accessor {
        buffer_view: Some(view),
        byte_offset: Some(USize64(0)),
        count: USize64::from(count),
        component_type: Valid(json::accessor::GenericComponentType(component)),
        type_: Valid(kind),
        min,
        max,
        name: None,
        normalized: false,
        sparse: None,
        extensions: Default::default(),
        extras: Default::default(),
    })
}

/// Registers one primitive with its three accessors and returns its node
fn push_primitive(
    root: &mut json::Root,
    arrays: &MeshArrays,
    material: json::Index<json::Material>,
    bin: &mut BinaryBuffer,
) -> json::Index<json::Node> {
    use json::accessor::{ComponentType, Type};
    use json::buffer::Target;

    let pos_view = push_view(root, bin.push(f32_bytes(&arrays.positions)), Target::ArrayBuffer);
    let uv_view = push_view(root, bin.push(f32_bytes(&arrays.uvs)), Target::ArrayBuffer);
    let idx_view = push_view(
        root,
        bin.push(u32_bytes(&arrays.indices)),
        Target::ElementArrayBuffer,
    );

    let position = push_accessor(
        root,
        pos_view,
        arrays.vertex_count(),
        ComponentType::F32,
        Type::Vec3,
        Some(arrays.position_bounds()),
    );
    let texcoord_0 = push_accessor(
        root,
        uv_view,
        arrays.uvs.len() / 2,
        ComponentType::F32,
        Type::Vec2,
        None,
    );
    let indices = push_accessor(
        root,
        idx_view,
        arrays.indices.len(),
        ComponentType::U32,
        Type::Scalar,
        None,
    );

    let mut attributes = BTreeMap::new();
    attributes.insert(Valid(json::mesh::Semantic::Positions), position);
    attributes.insert(Valid(json::mesh::Semantic::TexCoords(0)), texcoord_0);

    let mesh = root.push(json::Mesh {
        primitives: vec![json::mesh::Primitive {
            attributes,
            indices: Some(indices),
            material: Some(material),
            mode: Valid(json::mesh::Mode::Triangles),
            targets: None,
            extensions: Default::default(),
            extras: Default::default(),
        }],
        weights: None,
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    root.push(json::Node {
        mesh: Some(mesh),
        ..Default::default()
    })
}

/// Frames a JSON document and a binary payload into a GLB container.
///
/// Panics if the declared total length disagrees with the bytes written.
pub fn frame_glb(json: &[u8], bin: &[u8]) -> Vec<u8> {
    let mut json_chunk = json.to_vec();
    pad_to_4(&mut json_chunk, b' ');
    let mut bin_chunk = bin.to_vec();
    pad_to_4(&mut bin_chunk, 0);

    let total_length = GLB_HEADER_BYTES
        + GLB_CHUNK_HEADER_BYTES
        + json_chunk.len()
        + GLB_CHUNK_HEADER_BYTES
        + bin_chunk.len();

    let mut out = Vec::with_capacity(total_length);
    out.extend_from_slice(GLB_MAGIC);
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&(total_length as u32).to_le_bytes());

    out.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
    out.extend_from_slice(GLB_JSON_CHUNK_TYPE);
    out.extend_from_slice(&json_chunk);

    out.extend_from_slice(&(bin_chunk.len() as u32).to_le_bytes());
    out.extend_from_slice(GLB_BIN_CHUNK_TYPE);
    out.extend_from_slice(&bin_chunk);

    assert_eq!(out.len(), total_length, "GLB header length disagrees with written bytes");
    out
}

/// Exports mesh groups to a binary glTF container.
///
/// Materials follow `material_keys` order. Groups that flatten to no indices are
/// dropped; every other group becomes one mesh, one primitive and one node.
pub fn export_glb(groups: &[MeshGroup], material_keys: &[String]) -> ClusterResult<Vec<u8>> {
    let mut root = json::Root::default();
    root.asset = json::Asset {
        version: "2.0".to_string(),
        generator: Some(concat!("pendant-cluster ", env!("CARGO_PKG_VERSION")).to_string()),
        ..Default::default()
    };

    let mut material_index = HashMap::with_capacity(material_keys.len());
    for key in material_keys {
        let preset = material_preset(key);
        let material = root.push(json::Material {
            name: Some(preset.name.to_string()),
            pbr_metallic_roughness: json::material::PbrMetallicRoughness {
                base_color_factor: json::material::PbrBaseColorFactor(preset.base_color),
                metallic_factor: json::material::StrengthFactor(preset.metallic),
                roughness_factor: json::material::StrengthFactor(preset.roughness),
                ..Default::default()
            },
            double_sided: true,
            ..Default::default()
        });
        material_index.insert(key.as_str(), material);
    }

    let mut bin = BinaryBuffer::new();
    let mut nodes = Vec::with_capacity(groups.len());
    for group in groups {
        let material = *material_index
            .get(group.material_key.as_str())
            .ok_or_else(|| ClusterError::UnlistedMaterial(group.material_key.clone()))?;

        let arrays = mesh_to_arrays(&group.mesh, UvMapping::for_material(&group.material_key));
        if arrays.indices.is_empty() {
            log::debug!("Dropping empty mesh group ({})", group.material_key);
            continue;
        }

        nodes.push(push_primitive(&mut root, &arrays, material, &mut bin));
    }

    root.push(json::Buffer {
        byte_length: USize64::from(bin.byte_length()),
        uri: None,
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    let node_count = nodes.len();
    let scene = root.push(json::Scene {
        nodes,
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    root.scene = Some(scene);

    let json = serde_json::to_vec(&root)?;
    let glb = frame_glb(&json, &bin.into_bytes());

    log::info!(
        "Exported GLB: {} nodes, {} materials, {} bytes",
        node_count,
        root.materials.len(),
        glb.len()
    );
    Ok(glb)
}
