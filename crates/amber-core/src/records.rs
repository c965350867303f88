//! # Raw Records
//!
//! Serde mirrors of the upstream JSON payloads.
//!
//! This is the validation boundary: loosely shaped feed data is decoded
//! here into explicit records, and everything past this module works with
//! typed `TierTable`/`StatProfile`/entity values only. Field names follow the
//! feed's camelCase spelling.
//!
//! Absent optional fields default (`costItems` → empty, `addProps` → empty,
//! `requiredPlayerLevel` → 0, `coinCost` → 0).

use crate::StatMap;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeMap;

// =============================================================================
// SHARED
// =============================================================================

/// One curve-backed stat of an entity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProp {
    /// Name of the growth curve.
    #[serde(rename = "type")]
    pub curve: String,
    /// Stat key. Some weapon entries omit it and are skipped.
    #[serde(default)]
    pub prop_type: Option<String>,
    pub init_value: f64,
}

/// One ascension tier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPromote {
    #[serde(default)]
    pub promote_level: u32,
    #[serde(default)]
    pub cost_items: Option<BTreeMap<String, u32>>,
    pub unlock_max_level: u32,
    #[serde(default)]
    pub add_props: StatMap,
    #[serde(default)]
    pub required_player_level: u32,
    #[serde(default)]
    pub coin_cost: u32,
}

// =============================================================================
// CHARACTERS
// =============================================================================

/// Character index payload (`/avatar`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCharacterIndex {
    /// Id to summary, in feed order.
    pub items: IndexMap<String, RawCharacterSummary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCharacterSummary {
    pub rank: u8,
    pub name: String,
    #[serde(default)]
    pub element: String,
    #[serde(default)]
    pub weapon_type: String,
    pub icon: String,
    /// `[month, day]`
    pub birthday: (u8, u8),
    #[serde(default)]
    pub release: Option<i64>,
    pub route: String,
}

/// Character detail payload (`/avatar/{id}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCharacterDetail {
    pub fetter: RawFetter,
    pub upgrade: RawCharacterUpgrade,
    #[serde(default)]
    pub talent: IndexMap<String, RawTalent>,
    #[serde(default)]
    pub constellation: BTreeMap<usize, RawConstellation>,
    #[serde(default)]
    pub other: Option<RawOther>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawFetter {
    pub title: String,
    pub detail: String,
    pub constellation: String,
    pub native: String,
    #[serde(default)]
    pub cv: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCharacterUpgrade {
    pub prop: Vec<RawProp>,
    pub promote: Vec<RawPromote>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTalent {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub promote: Option<IndexMap<String, RawTalentPromote>>,
    #[serde(default)]
    pub cooldown: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTalentPromote {
    pub level: u32,
    #[serde(default)]
    pub cost_items: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub coin_cost: Option<u32>,
    pub description: Vec<String>,
    pub params: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawConstellation {
    pub name: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOther {
    pub name_card: RawNameCard,
    #[serde(default)]
    pub special_food: Option<RawSpecialFood>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawNameCard {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpecialFood {
    pub id: u32,
    pub name: String,
    pub rank: u8,
    pub effect_icon: String,
    pub icon: String,
}

// =============================================================================
// WEAPONS
// =============================================================================

/// Weapon index payload (`/weapon`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWeaponIndex {
    /// Weapon type code to display name.
    #[serde(default)]
    pub types: BTreeMap<String, String>,
    /// Id to summary, in feed order.
    pub items: IndexMap<u32, RawWeaponSummary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWeaponSummary {
    pub rank: u8,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub icon: String,
    pub route: String,
}

/// Weapon detail payload (`/weapon/{id}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeaponDetail {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub story_id: Option<u32>,
    #[serde(default)]
    pub affix: Option<BTreeMap<u32, RawAffix>>,
    pub upgrade: RawWeaponUpgrade,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeaponUpgrade {
    #[serde(default)]
    pub awaken_cost: Vec<u32>,
    pub prop: Vec<RawProp>,
    pub promote: Vec<RawPromote>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawAffix {
    pub name: String,
    /// Refinement rank to description.
    pub upgrade: BTreeMap<usize, String>,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promote_defaults_absent_fields() {
        let raw: RawPromote = serde_json::from_str(r#"{"unlockMaxLevel": 20}"#).expect("decode");
        assert_eq!(raw.promote_level, 0);
        assert_eq!(raw.cost_items, None);
        assert!(raw.add_props.is_empty());
        assert_eq!(raw.required_player_level, 0);
        assert_eq!(raw.coin_cost, 0);
    }

    #[test]
    fn weapon_prop_without_stat_key() {
        let raw: RawProp =
            serde_json::from_str(r#"{"type": "GROW_CURVE_CRITICAL_301", "initValue": 0.0}"#)
                .expect("decode");
        assert_eq!(raw.prop_type, None);
        assert_eq!(raw.curve, "GROW_CURVE_CRITICAL_301");
    }

    #[test]
    fn character_summary_birthday_tuple() {
        let json = r#"{
            "rank": 5, "name": "Raiden Shogun", "element": "Electric",
            "weaponType": "WEAPON_POLE", "icon": "UI_AvatarIcon_Shougun",
            "birthday": [6, 26], "release": 1630540800, "route": "Shougun"
        }"#;
        let raw: RawCharacterSummary = serde_json::from_str(json).expect("decode");
        assert_eq!(raw.birthday, (6, 26));
        assert_eq!(raw.release, Some(1_630_540_800));
    }

    #[test]
    fn weapon_index_numeric_ids() {
        let json = r#"{
            "types": {"WEAPON_SWORD_ONE_HAND": "Sword"},
            "items": {"11501": {"rank": 5, "type": "WEAPON_SWORD_ONE_HAND",
                      "name": "Aquila Favonia", "icon": "UI_EquipIcon_Sword_Falcon",
                      "route": "Aquila Favonia"}}
        }"#;
        let raw: RawWeaponIndex = serde_json::from_str(json).expect("decode");
        assert!(raw.items.contains_key(&11501));
    }

    #[test]
    fn weapon_index_keeps_feed_order() {
        let json = r#"{"items": {
            "15401": {"rank": 4, "type": "WEAPON_BOW", "name": "Favonius Warbow", "icon": "", "route": ""},
            "11501": {"rank": 5, "type": "WEAPON_SWORD_ONE_HAND", "name": "Aquila Favonia", "icon": "", "route": ""}
        }}"#;
        let raw: RawWeaponIndex = serde_json::from_str(json).expect("decode");
        let ids: Vec<_> = raw.items.keys().copied().collect();
        assert_eq!(ids, vec![15401, 11501]);
    }

    #[test]
    fn index_keeps_feed_order() {
        let json = r#"{"items": {
            "10000066": {"rank": 5, "name": "Kamisato Ayato", "icon": "", "birthday": [3, 26],
                         "route": "Ayato"},
            "10000002": {"rank": 5, "name": "Kamisato Ayaka", "icon": "", "birthday": [9, 28],
                         "route": "Ayaka"}
        }}"#;
        let raw: RawCharacterIndex = serde_json::from_str(json).expect("decode");
        let ids: Vec<_> = raw.items.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["10000066", "10000002"]);
    }
}
