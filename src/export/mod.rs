mod glb;
mod uv;

pub use glb::{
    export_glb, frame_glb, mesh_to_arrays, pad_to_4, BinaryBuffer, ByteSpan, MeshArrays,
    GLB_BIN_CHUNK_TYPE, GLB_CHUNK_HEADER_BYTES, GLB_HEADER_BYTES, GLB_JSON_CHUNK_TYPE, GLB_MAGIC,
    GLB_VERSION,
};
pub use uv::{UvMapping, UV_SCALE_MM};
