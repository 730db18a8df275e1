pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod loaders;
pub mod math;
pub mod scene;
pub mod types;

pub use config::ClusterConfig;
pub use error::{ClusterError, ClusterResult};
pub use loaders::{GltfTemplateSource, MemoryTemplateSource, TemplateSource, TemplateStore};
pub use scene::build_scene;
pub use types::{Face, Mesh, MeshGroup, Scene};

/// Generates the binary glTF scene for one configuration.
///
/// Pure apart from template loading: identical configs produce identical bytes.
pub fn generate_glb(config: &ClusterConfig, templates: &TemplateStore) -> ClusterResult<Vec<u8>> {
    let scene = build_scene(config, templates)?;
    export::export_glb(&scene.groups, &scene.material_keys)
}
