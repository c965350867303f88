//! # Weapon Module
//!
//! Weapons: index summaries, detail records, refinement affixes.
//!
//! A weapon has one base stat (attack) and at most one secondary stat; the
//! secondary stat is the first non-base curve stat in feed order.

use crate::curve::CurveTable;
use crate::primitives::REFINEMENT_RANKS;
use crate::records::{RawAffix, RawWeaponDetail, RawWeaponSummary};
use crate::stats::StatProfile;
use crate::{AmberError, BASE_ATTACK};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Index entry for a weapon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponSummary {
    pub id: u32,
    pub rank: u8,
    /// Display name of the weapon type, e.g. `Sword`.
    pub kind: String,
    pub name: String,
    pub icon: String,
    pub route: String,
}

impl WeaponSummary {
    /// Build a summary, resolving the type code through the index's type table.
    ///
    /// An unknown type code is kept as-is.
    #[must_use]
    pub fn from_raw(id: u32, raw: RawWeaponSummary, types: &BTreeMap<String, String>) -> Self {
        let kind = types.get(&raw.kind).cloned().unwrap_or(raw.kind);
        Self {
            id,
            rank: raw.rank,
            kind,
            name: raw.name,
            icon: raw.icon,
            route: raw.route,
        }
    }
}

impl fmt::Display for WeaponSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weapon({}, {})", self.id, self.name)
    }
}

/// Passive effect of a weapon across its refinement ranks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponAffix {
    pub id: u32,
    pub name: String,
    /// Description per refinement rank `0..REFINEMENT_RANKS`.
    pub descriptions: [Option<String>; REFINEMENT_RANKS],
}

impl WeaponAffix {
    /// Build an affix, placing each description at its rank.
    ///
    /// Returns `AmberError::InvalidRecord` for a rank outside
    /// `0..REFINEMENT_RANKS`.
    pub fn from_raw(id: u32, raw: RawAffix) -> Result<Self, AmberError> {
        let mut descriptions: [Option<String>; REFINEMENT_RANKS] = Default::default();
        for (rank, text) in raw.upgrade {
            let slot = descriptions.get_mut(rank).ok_or_else(|| {
                AmberError::InvalidRecord(format!(
                    "affix {} refinement rank {} outside 0..{}",
                    id, rank, REFINEMENT_RANKS
                ))
            })?;
            *slot = Some(text);
        }
        Ok(Self {
            id,
            name: raw.name,
            descriptions,
        })
    }

    /// Description at refinement `rank`, if the feed supplied one.
    #[must_use]
    pub fn description(&self, rank: usize) -> Option<&str> {
        self.descriptions.get(rank)?.as_deref()
    }
}

/// A fully loaded weapon.
#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    pub summary: WeaponSummary,
    pub description: String,
    pub story_id: Option<u32>,
    pub affixes: BTreeMap<u32, WeaponAffix>,
    /// Cost of each refinement.
    pub refinement_costs: Vec<u32>,
    pub stats: StatProfile,
}

impl Weapon {
    /// Build a weapon from its detail record.
    pub fn from_detail(
        summary: WeaponSummary,
        detail: RawWeaponDetail,
        curves: &CurveTable,
    ) -> Result<Self, AmberError> {
        let stats =
            StatProfile::from_records(&detail.upgrade.prop, &detail.upgrade.promote, curves)?;

        let affixes = detail
            .affix
            .unwrap_or_default()
            .into_iter()
            .map(|(id, raw)| Ok((id, WeaponAffix::from_raw(id, raw)?)))
            .collect::<Result<BTreeMap<_, _>, AmberError>>()?;

        tracing::debug!(
            id = summary.id,
            tiers = stats.tiers().len(),
            affixes = affixes.len(),
            "weapon loaded"
        );

        Ok(Self {
            summary,
            description: detail.description,
            story_id: detail.story_id,
            affixes,
            refinement_costs: detail.upgrade.awaken_cost,
            stats,
        })
    }

    /// Base attack at `level` and ascension `tier`.
    pub fn get_base_attack(&self, level: usize, tier: usize) -> Result<f64, AmberError> {
        self.stats.get_base_stat(BASE_ATTACK, level, tier)
    }

    /// Secondary stat key and value, `None` if the weapon has none.
    pub fn get_substat(
        &self,
        level: usize,
        tier: usize,
    ) -> Result<Option<(String, f64)>, AmberError> {
        self.stats.get_substat(level, tier)
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.summary, f)
    }
}
