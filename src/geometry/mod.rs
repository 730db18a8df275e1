mod cables;
mod canopy;
mod placement;
mod primitives;

pub use cables::{build_cables, MIN_CABLE_LENGTH};
pub use canopy::{build_canopy, Canopy};
pub use placement::{assignment_order, plan_placements, solve_drops, DropLayout, PendantPlacement};
pub use primitives::make_cylinder;
