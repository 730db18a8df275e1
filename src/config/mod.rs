//! Cluster configuration: the validated input to scene generation.

mod code;
mod presets;

pub use code::{canonicalize, decode, encode};
pub use presets::{
    material_preset, pendant_asset_stem, CanopySpec, MaterialPreset, CABLE_RADIUS_MM,
    CABLE_SEGMENTS, CANOPY_SEGMENTS, FALLBACK_MATERIAL, SHADE_MATERIAL_PREFIX,
};

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, ClusterResult};

pub const CANOPY_APPEARANCES: [&str; 2] = ["canopy_black", "canopy_white"];
pub const CABLE_APPEARANCES: [&str; 2] = ["cable_black", "cable_white"];
pub const SHADE_APPEARANCES: [&str; 3] = ["shade_natural", "shade_blonde", "shade_white"];

/// Spatial arrangement of attachment points on the canopy
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterType {
    Ring,
    RingWithCenter,
    RandomRing,
}

impl ClusterType {
    /// Whether one attachment point sits at the canopy center
    pub fn has_center(self) -> bool {
        matches!(self, ClusterType::RingWithCenter | ClusterType::RandomRing)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanopySize {
    S,
    M,
    L,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanopyConfig {
    pub size: CanopySize,
    pub appearance: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CableConfig {
    #[serde(default = "default_cable_appearance")]
    pub appearance: String,
}

impl Default for CableConfig {
    fn default() -> Self {
        Self {
            appearance: default_cable_appearance(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub cluster_type: Option<ClusterType>,
    #[serde(default = "default_first_drop")]
    pub first_drop_mm: u32,
    #[serde(default = "default_total_drop")]
    pub total_drop_mm: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cluster_type: None,
            first_drop_mm: default_first_drop(),
            total_drop_mm: default_total_drop(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendantConfig {
    pub model: String,
    #[serde(default = "default_shade_appearance")]
    pub appearance: String,
}

/// Full description of one pendant cluster
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub canopy: CanopyConfig,
    #[serde(default)]
    pub cable: CableConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    pub pendants: Vec<PendantConfig>,
    #[serde(default)]
    pub random_seed: u64,
}

fn default_cable_appearance() -> String {
    "cable_black".to_string()
}

fn default_shade_appearance() -> String {
    "shade_natural".to_string()
}

fn default_first_drop() -> u32 {
    1400
}

fn default_total_drop() -> u32 {
    2000
}

impl ClusterConfig {
    pub fn num_pendants(&self) -> usize {
        self.pendants.len()
    }

    /// Layout topology, defaulting to a plain ring for up to three pendants
    /// and a ring with a center drop above that
    pub fn resolved_topology(&self) -> ClusterType {
        self.layout.cluster_type.unwrap_or(if self.num_pendants() <= 3 {
            ClusterType::Ring
        } else {
            ClusterType::RingWithCenter
        })
    }

    /// Structural checks applied at the boundary, before any geometry is built
    pub fn validate(&self) -> ClusterResult<()> {
        if self.pendants.is_empty() {
            return Err(invalid("at least one pendant is required"));
        }
        let layout = &self.layout;
        if !(100..=6000).contains(&layout.first_drop_mm) {
            return Err(invalid("layout.first_drop_mm must be within 100..=6000"));
        }
        if !(200..=8000).contains(&layout.total_drop_mm) {
            return Err(invalid("layout.total_drop_mm must be within 200..=8000"));
        }
        if layout.total_drop_mm < layout.first_drop_mm {
            return Err(invalid("layout.total_drop_mm must be >= layout.first_drop_mm"));
        }
        if self.random_seed > i32::MAX as u64 {
            return Err(invalid("random_seed must be within 0..=2147483647"));
        }
        check_appearance("canopy.appearance", &self.canopy.appearance, &CANOPY_APPEARANCES)?;
        check_appearance("cable.appearance", &self.cable.appearance, &CABLE_APPEARANCES)?;
        for pendant in &self.pendants {
            check_appearance("pendant.appearance", &pendant.appearance, &SHADE_APPEARANCES)?;
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ClusterError {
    ClusterError::InvalidConfig(msg.to_string())
}

fn check_appearance(field: &str, value: &str, allowed: &[&str]) -> ClusterResult<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ClusterError::InvalidConfig(format!(
            "{field} '{value}' is not one of {allowed:?}"
        )))
    }
}
