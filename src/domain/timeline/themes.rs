//! Canonical theme vocabulary and the raw-tag canonicalizer.
//!
//! Upstream systems emit free-form theme tokens with ad-hoc prefix
//! conventions (`element:fire`, `pillar:xin-mao`, `dm:weak`). Aggregation
//! only ever scores the bounded vocabulary below; tokens outside it are
//! ignored.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Canonical shared theme vocabulary.
///
/// Variants are declared in lexical token order so the derived `Ord` matches
/// alphabetical ordering of the wire tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    DayMasterStrength,
    DriveAssertion,
    ElementEarth,
    ElementFire,
    ElementMetal,
    ElementWater,
    ElementWood,
    EmotionalDepth,
    ExpansionGrowth,
    LearningGrowth,
    LoveHarmony,
    PillarCycle,
    PressureMaturation,
    SpiritualReflection,
    StructureDiscipline,
    VolatilityAmbition,
}

impl Theme {
    /// All canonical themes, in token order.
    pub const ALL: [Theme; 16] = [
        Theme::DayMasterStrength,
        Theme::DriveAssertion,
        Theme::ElementEarth,
        Theme::ElementFire,
        Theme::ElementMetal,
        Theme::ElementWater,
        Theme::ElementWood,
        Theme::EmotionalDepth,
        Theme::ExpansionGrowth,
        Theme::LearningGrowth,
        Theme::LoveHarmony,
        Theme::PillarCycle,
        Theme::PressureMaturation,
        Theme::SpiritualReflection,
        Theme::StructureDiscipline,
        Theme::VolatilityAmbition,
    ];

    /// Parses a canonical wire token back into a theme.
    pub fn from_token(token: &str) -> Option<Theme> {
        Theme::ALL.iter().copied().find(|t| t.as_str() == token)
    }

    /// Returns the wire token for this theme.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::DayMasterStrength => "day_master_strength",
            Theme::DriveAssertion => "drive_assertion",
            Theme::ElementEarth => "element_earth",
            Theme::ElementFire => "element_fire",
            Theme::ElementMetal => "element_metal",
            Theme::ElementWater => "element_water",
            Theme::ElementWood => "element_wood",
            Theme::EmotionalDepth => "emotional_depth",
            Theme::ExpansionGrowth => "expansion_growth",
            Theme::LearningGrowth => "learning_growth",
            Theme::LoveHarmony => "love_harmony",
            Theme::PillarCycle => "pillar_cycle",
            Theme::PressureMaturation => "pressure_maturation",
            Theme::SpiritualReflection => "spiritual_reflection",
            Theme::StructureDiscipline => "structure_discipline",
            Theme::VolatilityAmbition => "volatility_ambition",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw keyword -> canonical theme lookup for unprefixed tokens.
static THEME_KEYWORDS: Lazy<HashMap<&'static str, Theme>> = Lazy::new(|| {
    let entries: [(&[&str], Theme); 9] = [
        (
            &["discipline", "responsibility", "structure", "saturn_return", "saturn_transit"],
            Theme::StructureDiscipline,
        ),
        (&["growth", "expansion", "guidance", "jupiter_return"], Theme::ExpansionGrowth),
        (&["disruption", "ambition"], Theme::VolatilityAmbition),
        (&["relationships", "comfort", "belonging"], Theme::LoveHarmony),
        (&["pressure", "constraint"], Theme::PressureMaturation),
        (&["learning", "trade"], Theme::LearningGrowth),
        (&["spirituality", "detachment"], Theme::SpiritualReflection),
        (&["emotions"], Theme::EmotionalDepth),
        (&["drive", "conflict"], Theme::DriveAssertion),
    ];
    let mut map = HashMap::new();
    for (keywords, theme) in entries {
        for keyword in keywords {
            map.insert(*keyword, theme);
        }
    }
    map
});

fn element_theme(tag: &str) -> Option<Theme> {
    match tag {
        "wood" => Some(Theme::ElementWood),
        "fire" => Some(Theme::ElementFire),
        "earth" => Some(Theme::ElementEarth),
        "metal" => Some(Theme::ElementMetal),
        "water" => Some(Theme::ElementWater),
        _ => None,
    }
}

/// Maps a cycle's raw theme tokens onto the canonical vocabulary.
///
/// Canonical tokens pass through unchanged. Subsystem-specific tags collapse
/// into shared themes (`element:fire` -> `element_fire`, any `pillar:` tag ->
/// `pillar_cycle`, any `dm:` tag -> `day_master_strength`); plain keywords go
/// through the keyword table. Unrecognized tokens are dropped.
pub fn canonicalize(raw_themes: &[String]) -> BTreeSet<Theme> {
    let mut canonical = BTreeSet::new();
    for raw in raw_themes {
        let lower = raw.to_lowercase();
        if let Some(tag) = lower.strip_prefix("element:") {
            if let Some(theme) = element_theme(tag.trim()) {
                canonical.insert(theme);
            }
            continue;
        }
        if lower.starts_with("pillar:") {
            canonical.insert(Theme::PillarCycle);
            continue;
        }
        if lower.starts_with("dm:") {
            canonical.insert(Theme::DayMasterStrength);
            continue;
        }
        if let Some(theme) = Theme::from_token(lower.as_str()) {
            canonical.insert(theme);
            continue;
        }
        if let Some(theme) = THEME_KEYWORDS.get(lower.as_str()) {
            canonical.insert(*theme);
        }
    }
    canonical
}
