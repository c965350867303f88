//! # Character Module
//!
//! Playable characters: index summaries and fully loaded detail records.
//!
//! A `CharacterSummary` comes from the index listing and is cheap. A
//! `Character` is built from a detail record once and is immutable after
//! that; it owns its stat profile, talents and constellations.

use crate::curve::CurveTable;
use crate::primitives::{
    CONSTELLATION_SLOTS, NORMAL_ATTACK_ICON_PREFIX, SKILL_ICON_PREFIX, TALENT_TYPE_BURST,
    TALENT_TYPE_PASSIVE,
};
use crate::records::{
    RawCharacterDetail, RawCharacterSummary, RawConstellation, RawFetter, RawNameCard,
    RawSpecialFood, RawTalent, RawTalentPromote,
};
use crate::stats::StatProfile;
use crate::template::render_lines;
use crate::AmberError;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// SUMMARY
// =============================================================================

/// Index entry for a character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSummary {
    pub id: String,
    pub rank: u8,
    pub name: String,
    pub element: String,
    pub weapon_type: String,
    pub icon: String,
    /// `(month, day)`
    pub birthday: (u8, u8),
    /// Release timestamp, absent for unreleased characters.
    pub release: Option<i64>,
    pub route: String,
}

impl CharacterSummary {
    #[must_use]
    pub fn from_raw(id: impl Into<String>, raw: RawCharacterSummary) -> Self {
        Self {
            id: id.into(),
            rank: raw.rank,
            name: raw.name,
            element: raw.element,
            weapon_type: raw.weapon_type,
            icon: raw.icon,
            birthday: raw.birthday,
            release: raw.release,
            route: raw.route,
        }
    }
}

impl fmt::Display for CharacterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Avatar({}, {})", self.id, self.name)
    }
}

// =============================================================================
// DETAIL PARTS
// =============================================================================

/// Lore block of a character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterInfo {
    pub title: String,
    pub detail: String,
    pub constellation: String,
    pub native: String,
    /// Voice actors by language.
    pub cv: BTreeMap<String, String>,
}

impl From<RawFetter> for CharacterInfo {
    fn from(raw: RawFetter) -> Self {
        Self {
            title: raw.title,
            detail: raw.detail,
            constellation: raw.constellation,
            native: raw.native,
            cv: raw.cv,
        }
    }
}

/// One talent level with its description template and parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TalentPromotionStep {
    pub level: u32,
    pub item_cost: BTreeMap<String, u32>,
    pub coin_cost: u32,
    pub description_format: Vec<String>,
    pub parameters: Vec<f64>,
}

impl TalentPromotionStep {
    /// Rendered description lines, empty lines dropped.
    pub fn description(&self) -> Result<Vec<String>, AmberError> {
        render_lines(&self.description_format, &self.parameters)
    }
}

impl From<RawTalentPromote> for TalentPromotionStep {
    fn from(raw: RawTalentPromote) -> Self {
        Self {
            level: raw.level,
            item_cost: raw.cost_items.unwrap_or_default(),
            coin_cost: raw.coin_cost.unwrap_or_default(),
            description_format: raw.description,
            parameters: raw.params,
        }
    }
}

/// Active or passive talent.
#[derive(Debug, Clone, PartialEq)]
pub struct Talent {
    /// Upstream type code (1 = burst, 2 = passive).
    pub kind: u8,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Promotion steps keyed by talent level; `None` for passives.
    pub promotions: Option<IndexMap<String, TalentPromotionStep>>,
    pub cooldown: Option<f64>,
    pub energy_cost: Option<f64>,
}

impl Talent {
    #[must_use]
    pub fn is_passive(&self) -> bool {
        self.kind == TALENT_TYPE_PASSIVE
    }

    /// Promotion step for a talent level, e.g. `"10"`.
    #[must_use]
    pub fn promotion(&self, level: &str) -> Option<&TalentPromotionStep> {
        self.promotions.as_ref()?.get(level)
    }
}

impl From<RawTalent> for Talent {
    fn from(raw: RawTalent) -> Self {
        let passive = raw.kind == TALENT_TYPE_PASSIVE;
        Self {
            kind: raw.kind,
            name: raw.name,
            // Upstream escapes newlines in talent text.
            description: raw.description.replace("\\n", "\n"),
            icon: raw.icon,
            promotions: if passive {
                None
            } else {
                Some(
                    raw.promote
                        .unwrap_or_default()
                        .into_iter()
                        .map(|(level, step)| (level, step.into()))
                        .collect(),
                )
            },
            cooldown: if passive { None } else { raw.cooldown },
            energy_cost: if passive { None } else { raw.cost },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constellation {
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl From<RawConstellation> for Constellation {
    fn from(raw: RawConstellation) -> Self {
        Self {
            name: raw.name,
            description: raw.description,
            icon: raw.icon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameCard {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl From<RawNameCard> for NameCard {
    fn from(raw: RawNameCard) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            icon: raw.icon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialFood {
    pub id: u32,
    pub name: String,
    pub rank: u8,
    pub effect_icon: String,
    pub icon: String,
}

impl From<RawSpecialFood> for SpecialFood {
    fn from(raw: RawSpecialFood) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            rank: raw.rank,
            effect_icon: raw.effect_icon,
            icon: raw.icon,
        }
    }
}

// =============================================================================
// CHARACTER
// =============================================================================

/// A fully loaded character.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub summary: CharacterSummary,
    pub info: CharacterInfo,
    pub stats: StatProfile,
    /// Talents in feed order.
    pub talents: IndexMap<String, Talent>,
    /// Slots `0..CONSTELLATION_SLOTS`; absent slots stay `None`.
    pub constellations: [Option<Constellation>; CONSTELLATION_SLOTS],
    pub name_card: Option<NameCard>,
    pub special_food: Option<SpecialFood>,
}

impl Character {
    /// Build a character from its detail record.
    ///
    /// # Errors
    /// - `CurveNotFound` if a stat references an unknown curve
    /// - `InvalidRecord` if a constellation slot is out of range
    pub fn from_detail(
        summary: CharacterSummary,
        detail: RawCharacterDetail,
        curves: &CurveTable,
    ) -> Result<Self, AmberError> {
        let stats =
            StatProfile::from_records(&detail.upgrade.prop, &detail.upgrade.promote, curves)?;

        let mut constellations: [Option<Constellation>; CONSTELLATION_SLOTS] = Default::default();
        for (slot, raw) in detail.constellation {
            let entry = constellations.get_mut(slot).ok_or_else(|| {
                AmberError::InvalidRecord(format!(
                    "constellation slot {} of {} outside 0..{}",
                    slot, summary.id, CONSTELLATION_SLOTS
                ))
            })?;
            *entry = Some(raw.into());
        }

        let (name_card, special_food) = match detail.other {
            Some(other) => (
                Some(other.name_card.into()),
                other.special_food.map(Into::into),
            ),
            None => (None, None),
        };

        tracing::debug!(
            id = %summary.id,
            tiers = stats.tiers().len(),
            stats = stats.level_stats().len(),
            "character loaded"
        );

        Ok(Self {
            info: detail.fetter.into(),
            stats,
            talents: detail
                .talent
                .into_iter()
                .map(|(id, raw)| (id, raw.into()))
                .collect(),
            constellations,
            name_card,
            special_food,
            summary,
        })
    }

    pub fn get_base_stat(&self, key: &str, level: usize, tier: usize) -> Result<f64, AmberError> {
        self.stats.get_base_stat(key, level, tier)
    }

    pub fn get_hp(&self, level: usize, tier: usize) -> Result<f64, AmberError> {
        self.stats.get_hp(level, tier)
    }

    pub fn get_attack(&self, level: usize, tier: usize) -> Result<f64, AmberError> {
        self.stats.get_attack(level, tier)
    }

    pub fn get_defense(&self, level: usize, tier: usize) -> Result<f64, AmberError> {
        self.stats.get_defense(level, tier)
    }

    pub fn get_extra_stats(&self, tier: usize) -> Result<Vec<(String, f64)>, AmberError> {
        self.stats.get_extra_stats(tier)
    }

    fn find_talent(&self, pred: impl Fn(&Talent) -> bool) -> Option<&Talent> {
        self.talents.values().find(|talent| pred(talent))
    }

    /// Normal attack talent.
    #[must_use]
    pub fn talent_normal(&self) -> Option<&Talent> {
        self.find_talent(|t| t.icon.starts_with(NORMAL_ATTACK_ICON_PREFIX))
    }

    /// Elemental skill talent.
    #[must_use]
    pub fn talent_skill(&self) -> Option<&Talent> {
        self.find_talent(|t| t.icon.starts_with(SKILL_ICON_PREFIX) && t.icon.ends_with("01"))
    }

    /// Alternate sprint, for the few characters that have one.
    #[must_use]
    pub fn talent_alternate_dash(&self) -> Option<&Talent> {
        self.find_talent(|t| t.icon.starts_with(SKILL_ICON_PREFIX) && t.icon.ends_with("02"))
    }

    /// Elemental burst talent.
    #[must_use]
    pub fn talent_burst(&self) -> Option<&Talent> {
        self.find_talent(|t| t.kind == TALENT_TYPE_BURST)
    }

    #[must_use]
    pub fn talent_passives(&self) -> Vec<&Talent> {
        self.talents.values().filter(|t| t.is_passive()).collect()
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.summary, f)
    }
}

// =============================================================================
// TESTS
// =============================================================================
