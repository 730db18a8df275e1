//! Compact, URL-safe configuration codes such as `C11.L114020.B0.P3-6,1-6,1-12,0.G42`.
//!
//! Segments are separated by `.` and start with a prefix letter:
//! `C` canopy, `L` layout, `B` cable, `P` pendants, `G` seed.

use super::{
    CableConfig, CanopyConfig, CanopySize, ClusterConfig, ClusterType, LayoutConfig,
    PendantConfig,
};
use crate::error::{ClusterError, ClusterResult};

const CANOPY_SIZES: [CanopySize; 3] = [CanopySize::S, CanopySize::M, CanopySize::L];
const CANOPY_APPEARANCE_IDS: [&str; 2] = ["canopy_black", "canopy_white"];
const CABLE_APPEARANCE_IDS: [&str; 2] = ["cable_black", "cable_white"];
const SHADE_APPEARANCE_IDS: [&str; 3] = ["shade_natural", "shade_blonde", "shade_white"];
const CLUSTER_TYPES: [ClusterType; 3] = [
    ClusterType::Ring,
    ClusterType::RingWithCenter,
    ClusterType::RandomRing,
];

/// Frozen public IDs. Some models are retired and have no asset anymore,
/// but their IDs are never reused.
const PENDANT_MODEL_IDS: [&str; 26] = [
    "denny", "alki", "allyn", "madison", "oliv", "moon10", "moon14", "moon18", "moon24",
    "moon32", "nest24", "nest32", "hive9", "hive12", "hive15", "drop18", "drop26", "disc16",
    "disc20", "disc24", "disc32", "bell10", "bell16", "ausi8", "ausi12", "ausi14",
];

fn bad(msg: impl Into<String>) -> ClusterError {
    ClusterError::InvalidCode(msg.into())
}

fn parse_id(text: &str, what: &str) -> ClusterResult<usize> {
    text.parse::<usize>()
        .map_err(|_| bad(format!("malformed {what} '{text}'")))
}

/// Drop lengths travel in 100 mm units
fn parse_drop(text: &str, what: &str) -> ClusterResult<u32> {
    text.parse::<u32>()
        .ok()
        .and_then(|units| units.checked_mul(100))
        .ok_or_else(|| bad(format!("malformed {what} '{text}'")))
}

fn lookup<T: Copy>(table: &[T], id: usize, what: &str) -> ClusterResult<T> {
    table
        .get(id)
        .copied()
        .ok_or_else(|| bad(format!("unknown {what} id {id}")))
}

fn reverse<T: PartialEq>(table: &[T], value: &T, what: &str) -> ClusterResult<usize> {
    table
        .iter()
        .position(|v| v == value)
        .ok_or_else(|| bad(format!("{what} has no code id")))
}

/// Decodes a configuration code into a validated configuration
pub fn decode(code: &str) -> ClusterResult<ClusterConfig> {
    let code = code.trim();
    if code.is_empty() {
        return Err(bad("empty configuration code"));
    }

    let mut canopy = None;
    let mut layout = None;
    let mut cable = None;
    let mut pendants = Vec::new();
    let mut random_seed = 0u64;

    for segment in code.split('.').filter(|s| !s.is_empty()) {
        // Prefixes are ASCII; a multibyte first char is simply an unknown segment
        let (prefix, body) = segment.split_at(segment.chars().next().map_or(0, char::len_utf8));

        match prefix {
            "C" => {
                if body.len() < 2 || !body.is_char_boundary(1) {
                    return Err(bad("malformed canopy segment (C)"));
                }
                let size = lookup(&CANOPY_SIZES, parse_id(&body[..1], "canopy size")?, "canopy size")?;
                let appearance = lookup(
                    &CANOPY_APPEARANCE_IDS,
                    parse_id(&body[1..], "canopy appearance")?,
                    "canopy appearance",
                )?;
                canopy = Some(CanopyConfig {
                    size,
                    appearance: appearance.to_string(),
                });
            }
            "L" => {
                if body.len() < 4 || !body.is_char_boundary(1) || !body.is_char_boundary(3) {
                    return Err(bad("malformed layout segment (L)"));
                }
                let cluster_type =
                    lookup(&CLUSTER_TYPES, parse_id(&body[..1], "cluster type")?, "cluster type")?;
                let first = parse_drop(&body[1..3], "first drop")?;
                let total = parse_drop(&body[3..], "total drop")?;
                layout = Some(LayoutConfig {
                    cluster_type: Some(cluster_type),
                    first_drop_mm: first,
                    total_drop_mm: total,
                });
            }
            "B" => {
                let appearance = lookup(
                    &CABLE_APPEARANCE_IDS,
                    parse_id(body, "cable appearance")?,
                    "cable appearance",
                )?;
                cable = Some(CableConfig {
                    appearance: appearance.to_string(),
                });
            }
            "P" => {
                pendants = decode_pendants(body)?;
            }
            "G" => {
                random_seed = body
                    .parse::<u64>()
                    .map_err(|_| bad(format!("malformed seed '{body}'")))?;
            }
            other => {
                log::debug!("Skipping unknown code segment '{}'", other);
            }
        }
    }

    let canopy = canopy.ok_or_else(|| bad("missing canopy segment (C)"))?;
    if pendants.is_empty() {
        return Err(bad("at least one pendant must be specified"));
    }

    let config = ClusterConfig {
        canopy,
        cable: cable.unwrap_or_default(),
        layout: layout.unwrap_or_default(),
        pendants,
        random_seed,
    };
    config.validate()?;
    Ok(config)
}

fn decode_pendants(body: &str) -> ClusterResult<Vec<PendantConfig>> {
    let (count, items) = body
        .split_once('-')
        .ok_or_else(|| bad("malformed pendant segment (P)"))?;
    let count = parse_id(count, "pendant count")?;
    let tokens: Vec<&str> = if items.is_empty() {
        Vec::new()
    } else {
        items.split('-').collect()
    };

    if tokens.len() != count {
        return Err(bad(format!(
            "pendant count {count} does not match {} entries",
            tokens.len()
        )));
    }

    tokens
        .into_iter()
        .map(|token| {
            let (model, shade) = token
                .split_once(',')
                .ok_or_else(|| bad(format!("malformed pendant entry '{token}'")))?;
            let model = lookup(&PENDANT_MODEL_IDS, parse_id(model, "pendant model")?, "pendant model")?;
            let shade = lookup(&SHADE_APPEARANCE_IDS, parse_id(shade, "shade")?, "shade")?;
            Ok(PendantConfig {
                model: model.to_string(),
                appearance: shade.to_string(),
            })
        })
        .collect()
}

/// Encodes a configuration into its compact code
pub fn encode(config: &ClusterConfig) -> ClusterResult<String> {
    let size_id = reverse(&CANOPY_SIZES, &config.canopy.size, "canopy size")?;
    let canopy_id = reverse(
        &CANOPY_APPEARANCE_IDS,
        &config.canopy.appearance.as_str(),
        "canopy appearance",
    )?;

    let type_id = reverse(&CLUSTER_TYPES, &config.resolved_topology(), "cluster type")?;
    let first = (config.layout.first_drop_mm as f64 / 100.0).round_ties_even() as u32;
    let total = (config.layout.total_drop_mm as f64 / 100.0).round_ties_even() as u32;
    if first > 99 {
        return Err(bad("layout.first_drop_mm out of encodable range"));
    }
    if total > 999 {
        return Err(bad("layout.total_drop_mm out of encodable range"));
    }

    let cable_id = reverse(
        &CABLE_APPEARANCE_IDS,
        &config.cable.appearance.as_str(),
        "cable appearance",
    )?;

    let items = config
        .pendants
        .iter()
        .map(|p| {
            let model = reverse(&PENDANT_MODEL_IDS, &p.model.as_str(), "pendant model")?;
            let shade = reverse(&SHADE_APPEARANCE_IDS, &p.appearance.as_str(), "shade")?;
            Ok(format!("{model},{shade}"))
        })
        .collect::<ClusterResult<Vec<_>>>()?;

    Ok(format!(
        "C{size_id}{canopy_id}.L{type_id}{first:02}{total:03}.B{cable_id}.P{}-{}.G{}",
        items.len(),
        items.join("-"),
        config.random_seed
    ))
}

/// Decodes then re-encodes, so equivalent codes share one spelling
pub fn canonicalize(code: &str) -> ClusterResult<(String, ClusterConfig)> {
    let config = decode(code)?;
    Ok((encode(&config)?, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_code() {
        let cfg = decode("C11.L214020.B1.P2-6,1-13,2.G42").unwrap();

        assert_eq!(cfg.canopy.size, CanopySize::M);
        assert_eq!(cfg.canopy.appearance, "canopy_white");
        assert_eq!(cfg.layout.cluster_type, Some(ClusterType::RandomRing));
        assert_eq!(cfg.layout.first_drop_mm, 1400);
        assert_eq!(cfg.layout.total_drop_mm, 2000);
        assert_eq!(cfg.cable.appearance, "cable_white");
        assert_eq!(cfg.pendants.len(), 2);
        assert_eq!(cfg.pendants[0].model, "moon14");
        assert_eq!(cfg.pendants[0].appearance, "shade_blonde");
        assert_eq!(cfg.pendants[1].model, "hive12");
        assert_eq!(cfg.pendants[1].appearance, "shade_white");
        assert_eq!(cfg.random_seed, 42);
    }

    #[test]
    fn test_decode_defaults_missing_segments() {
        let cfg = decode("C00.P1-0,0").unwrap();
        assert_eq!(cfg.cable.appearance, "cable_black");
        assert_eq!(cfg.layout.cluster_type, None);
        assert_eq!(cfg.layout.first_drop_mm, 1400);
        assert_eq!(cfg.random_seed, 0);
    }

    #[test]
    fn test_decode_skips_unknown_segments() {
        assert!(decode("C00.X99.P1-0,0").is_ok());
    }

    #[test]
    fn test_decode_rejects_count_mismatch() {
        assert!(matches!(
            decode("C00.P3-0,0-1,0"),
            Err(ClusterError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_decode_rejects_missing_canopy() {
        assert!(decode("P1-0,0").is_err());
    }

    #[test]
    fn test_decode_rejects_unknown_model_id() {
        assert!(decode("C00.P1-26,0").is_err());
    }

    #[test]
    fn test_decode_rejects_inverted_drops() {
        // first 20 * 100 > total 10 * 100
        assert!(matches!(
            decode("C00.L020010.P1-0,0"),
            Err(ClusterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_encode_resolves_default_topology() {
        let cfg = decode("C20.P4-0,0-1,0-2,0-3,0").unwrap();
        let code = encode(&cfg).unwrap();
        assert_eq!(code, "C20.L114020.B0.P4-0,0-1,0-2,0-3,0.G0");
    }

    #[test]
    fn test_canonicalize_normalizes_segment_order() {
        let (code, _) = canonicalize("G5.P1-8,2.B1.C10").unwrap();
        assert_eq!(code, "C10.L014020.B1.P1-8,2.G5");
    }

    #[test]
    fn test_encode_rounds_half_drops_to_even() {
        let mut cfg = decode("C10.L014020.P1-8,2").unwrap();
        cfg.layout.first_drop_mm = 1450;
        cfg.layout.total_drop_mm = 2550;
        assert_eq!(encode(&cfg).unwrap(), "C10.L014026.B0.P1-8,2.G0");

        cfg.layout.first_drop_mm = 1550;
        assert_eq!(encode(&cfg).unwrap(), "C10.L016026.B0.P1-8,2.G0");
    }
}
