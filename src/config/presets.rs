use super::CanopySize;

/// Cable radius in millimeters
pub const CABLE_RADIUS_MM: f64 = 2.5;

/// Circumferential tessellation for canopy discs
pub const CANOPY_SEGMENTS: u32 = 96;

/// Circumferential tessellation for cables
pub const CABLE_SEGMENTS: u32 = 32;

/// Material keys with this prefix get cylindrical UVs on export
pub const SHADE_MATERIAL_PREFIX: &str = "shade_";

pub const FALLBACK_MATERIAL: &str = "shade_natural";

/// Physical canopy dimensions, all in millimeters
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CanopySpec {
    pub outer_radius_mm: f64,
    pub inner_radius_mm: f64,
    pub cable_offset_mm: f64,
    pub height_mm: f64,
    pub plate_thickness_mm: f64,
}

impl CanopySize {
    pub fn spec(self) -> CanopySpec {
        let (outer, inner, offset) = match self {
            CanopySize::S => (150.0, 130.0, 20.0),
            CanopySize::M => (300.0, 280.0, 30.0),
            CanopySize::L => (450.0, 430.0, 30.0),
        };
        CanopySpec {
            outer_radius_mm: outer,
            inner_radius_mm: inner,
            cable_offset_mm: offset,
            height_mm: 40.0,
            plate_thickness_mm: 1.5,
        }
    }
}

/// Untextured metallic-roughness material
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialPreset {
    pub name: &'static str,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
}

const fn preset(name: &'static str, [r, g, b]: [f32; 3], roughness: f32) -> MaterialPreset {
    MaterialPreset {
        name,
        base_color: [r, g, b, 1.0],
        metallic: 0.0,
        roughness,
    }
}

const MATERIAL_PRESETS: [(&str, MaterialPreset); 7] = [
    ("canopy_white", preset("CanopyWhite", [0.95, 0.95, 0.95], 0.6)),
    ("canopy_black", preset("CanopyBlack", [0.05, 0.05, 0.05], 0.65)),
    ("cable_white", preset("CableWhite", [0.92, 0.92, 0.92], 0.8)),
    ("cable_black", preset("CableBlack", [0.03, 0.03, 0.03], 0.85)),
    ("shade_white", preset("ShadeWhite", [0.82, 0.81, 0.78], 0.95)),
    ("shade_blonde", preset("ShadeBlonde", [0.48, 0.40, 0.26], 0.95)),
    ("shade_natural", preset("ShadeNatural", [0.13, 0.09, 0.05], 0.98)),
];

/// Looks up a material preset, falling back to natural shade for unknown keys
pub fn material_preset(key: &str) -> MaterialPreset {
    let key = key.trim();
    let lookup = |k: &str| MATERIAL_PRESETS.iter().find(|(name, _)| *name == k).map(|(_, p)| *p);
    lookup(key)
        .or_else(|| lookup(FALLBACK_MATERIAL))
        .unwrap_or(MATERIAL_PRESETS[6].1)
}

/// Asset file stem for a pendant model key, `None` if the model has no shipped asset
pub fn pendant_asset_stem(model: &str) -> Option<&'static str> {
    let stem = match model {
        "denny" => "Denny",
        "alki" => "Alki",
        "allyn" => "Allyn",
        "madison" => "Madison",
        "moon10" => "Moon10",
        "moon14" => "Moon14",
        "moon18" => "Moon18",
        "moon24" => "Moon24",
        "nest24" => "Nest24",
        "nest32" => "Nest32",
        "hive9" => "Hive9",
        "hive12" => "Hive12",
        "hive15" => "Hive15",
        "drop18" => "Drop18",
        "drop26" => "Drop26",
        "disc16" => "Disc16",
        "disc20" => "Disc20",
        "disc24" => "Disc24",
        "bell10" => "Bell10",
        "bell16" => "Bell16",
        "ausi8" => "Ausi8",
        "ausi12" => "Ausi12",
        "ausi14" => "Ausi14",
        _ => return None,
    };
    Some(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_preset() {
        let p = material_preset("cable_white");
        assert_eq!(p.name, "CableWhite");
        assert_eq!(p.base_color, [0.92, 0.92, 0.92, 1.0]);
        assert_eq!(p.roughness, 0.8);
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        assert_eq!(material_preset("chrome").name, "ShadeNatural");
    }

    #[test]
    fn test_preset_key_is_trimmed() {
        assert_eq!(material_preset(" canopy_black ").name, "CanopyBlack");
    }

    #[test]
    fn test_shade_preset_keeps_tint() {
        let p = material_preset("shade_blonde");
        assert_eq!(p.base_color, [0.48, 0.40, 0.26, 1.0]);
        assert_eq!(p.metallic, 0.0);
        assert_eq!(p.roughness, 0.95);
    }

    #[test]
    fn test_canopy_spec_small() {
        let spec = CanopySize::S.spec();
        assert_eq!(spec.outer_radius_mm, 150.0);
        assert_eq!(spec.inner_radius_mm, 130.0);
        assert_eq!(spec.cable_offset_mm, 20.0);
    }

    #[test]
    fn test_retired_models_have_no_asset() {
        assert_eq!(pendant_asset_stem("moon24"), Some("Moon24"));
        assert_eq!(pendant_asset_stem("oliv"), None);
        assert_eq!(pendant_asset_stem("disc32"), None);
    }
}
