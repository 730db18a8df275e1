pub mod gltf;
pub mod templates;

pub use gltf::GltfTemplateSource;
pub use templates::{
    MemoryTemplateSource, PendantTemplate, TemplateSource, TemplateStore,
    DEFAULT_TEMPLATE_CAPACITY,
};
