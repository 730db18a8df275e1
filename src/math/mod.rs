mod aabb;
mod rotation;

pub use aabb::AABB;
pub use rotation::align_z_to;
