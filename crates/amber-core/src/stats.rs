//! # Stat Resolution
//!
//! Composes curve lookups with tier overrides:
//!
//! ```text
//! stat(key, level, tier) = initial[key] * curve[key](level) + tiers[tier].stats[key]
//! ```
//!
//! A key with no curve-backed value is a programming error (`StatNotFound`).
//! A tier without an override for the key contributes zero.

use crate::curve::{CurveTable, CurvedValue};
use crate::records::{RawPromote, RawProp};
use crate::tier::TierTable;
use crate::{AmberError, BASE_ATTACK, BASE_DEFENSE, BASE_HP, is_base_stat};
use indexmap::IndexMap;

// =============================================================================
// LEVEL STATS
// =============================================================================

/// Curve-backed stats of one entity, in feed order.
///
/// Order is significant: a weapon's substat is the first non-base entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelStats {
    entries: IndexMap<String, CurvedValue>,
}

impl LevelStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a curved value to `key`. Rebinding keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: CurvedValue) {
        self.entries.insert(key.into(), value);
    }

    /// Resolve raw prop entries against the curve table.
    ///
    /// Entries without a stat key are skipped. Unknown curve names fail with
    /// `AmberError::CurveNotFound`.
    pub fn from_props(props: &[RawProp], curves: &CurveTable) -> Result<Self, AmberError> {
        let mut stats = Self::new();
        for prop in props {
            let Some(key) = &prop.prop_type else {
                continue;
            };
            stats.insert(key.clone(), curves.curved_value(&prop.curve, prop.init_value)?);
        }
        Ok(stats)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CurvedValue> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CurvedValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// STAT PROFILE
// =============================================================================

/// Curve-backed stats plus ascension tiers of one character or weapon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatProfile {
    level_stats: LevelStats,
    tiers: TierTable,
}

impl StatProfile {
    #[must_use]
    pub fn new(level_stats: LevelStats, tiers: TierTable) -> Self {
        Self { level_stats, tiers }
    }

    /// Build a profile from an entity's raw `prop` and `promote` lists.
    pub fn from_records(
        props: &[RawProp],
        promotes: &[RawPromote],
        curves: &CurveTable,
    ) -> Result<Self, AmberError> {
        Ok(Self::new(
            LevelStats::from_props(props, curves)?,
            TierTable::from_records(promotes),
        ))
    }

    #[must_use]
    pub fn level_stats(&self) -> &LevelStats {
        &self.level_stats
    }

    #[must_use]
    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Value of `key` at `level` and ascension `tier`.
    ///
    /// # Errors
    /// - `StatNotFound` if the entity has no curve-backed value for `key`
    /// - `IndexOutOfRange` if `level` is outside the curve or `tier` outside
    ///   the tier table
    pub fn get_base_stat(&self, key: &str, level: usize, tier: usize) -> Result<f64, AmberError> {
        let curved = self
            .level_stats
            .get(key)
            .ok_or_else(|| AmberError::StatNotFound(key.to_string()))?;
        let base = curved.evaluate(level)?;
        let step = self.tiers.get(tier)?;
        Ok(base + step.stat_override(key))
    }

    pub fn get_attack(&self, level: usize, tier: usize) -> Result<f64, AmberError> {
        self.get_base_stat(BASE_ATTACK, level, tier)
    }

    pub fn get_defense(&self, level: usize, tier: usize) -> Result<f64, AmberError> {
        self.get_base_stat(BASE_DEFENSE, level, tier)
    }

    pub fn get_hp(&self, level: usize, tier: usize) -> Result<f64, AmberError> {
        self.get_base_stat(BASE_HP, level, tier)
    }

    /// Secondary stat bonuses granted at `tier`, in feed order.
    pub fn get_extra_stats(&self, tier: usize) -> Result<Vec<(String, f64)>, AmberError> {
        Ok(self.tiers.get(tier)?.extra_stats())
    }

    /// The first curve-backed secondary stat and its value.
    ///
    /// Returns `Ok(None)` when every curve-backed stat is a base stat.
    pub fn get_substat(
        &self,
        level: usize,
        tier: usize,
    ) -> Result<Option<(String, f64)>, AmberError> {
        let Some((key, curved)) = self.level_stats.iter().find(|(key, _)| !is_base_stat(key))
        else {
            return Ok(None);
        };
        let base = curved.evaluate(level)?;
        let step = self.tiers.get(tier)?;
        Ok(Some((key.to_string(), base + step.stat_override(key))))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CurveBucket, CurveFeed};

    const CRIT: &str = "FIGHT_PROP_CRITICAL";

    fn table() -> CurveTable {
        let feed: CurveFeed = (1..=4)
            .map(|level| {
                let m = level as f64;
                (
                    level,
                    CurveBucket::from_pairs([("LINEAR", m), ("DOUBLE", 2.0 * m)]),
                )
            })
            .collect();
        CurveTable::build([&feed]).expect("build")
    }

    fn promote(max_level: u32, add_props: &str) -> RawPromote {
        serde_json::from_str(&format!(
            r#"{{"unlockMaxLevel": {}, "addProps": {}}}"#,
            max_level, add_props
        ))
        .expect("promote")
    }

    fn prop(curve: &str, key: Option<&str>, init: f64) -> RawProp {
        RawProp {
            curve: curve.to_string(),
            prop_type: key.map(str::to_string),
            init_value: init,
        }
    }

    fn profile() -> StatProfile {
        StatProfile::from_records(
            &[
                prop("LINEAR", Some(BASE_HP), 100.0),
                prop("DOUBLE", Some(BASE_ATTACK), 10.0),
                prop("LINEAR", Some(BASE_DEFENSE), 5.0),
            ],
            &[
                promote(2, "{}"),
                promote(4, r#"{"FIGHT_PROP_BASE_HP": 50.0, "FIGHT_PROP_CRITICAL": 0.05}"#),
            ],
            &table(),
        )
        .expect("profile")
    }

    #[test]
    fn base_stat_combines_curve_and_override() {
        let profile = profile();
        assert_eq!(profile.get_hp(3, 0).expect("hp"), 300.0);
        assert_eq!(profile.get_hp(3, 1).expect("hp"), 350.0);
        assert_eq!(profile.get_attack(4, 1).expect("atk"), 80.0);
        assert_eq!(profile.get_defense(1, 1).expect("def"), 5.0);
    }

    #[test]
    fn unknown_stat_is_error() {
        let err = profile().get_base_stat(CRIT, 1, 0).expect_err("no curve");
        assert!(matches!(err, AmberError::StatNotFound(key) if key == CRIT));
    }

    #[test]
    fn level_outside_curve_is_error() {
        assert!(matches!(
            profile().get_hp(5, 0),
            Err(AmberError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            profile().get_hp(0, 0),
            Err(AmberError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn tier_outside_table_is_error() {
        assert!(matches!(
            profile().get_hp(1, 2),
            Err(AmberError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn extra_stats_surface_secondary_bonuses() {
        let profile = profile();
        assert!(profile.get_extra_stats(0).expect("tier 0").is_empty());
        assert_eq!(
            profile.get_extra_stats(1).expect("tier 1"),
            vec![(CRIT.to_string(), 0.05)]
        );
    }

    #[test]
    fn substat_absent_when_only_base_stats() {
        assert_eq!(profile().get_substat(1, 0).expect("substat"), None);
    }

    #[test]
    fn substat_is_first_secondary_in_feed_order() {
        let profile = StatProfile::from_records(
            &[
                prop("DOUBLE", Some(BASE_ATTACK), 20.0),
                prop("LINEAR", None, 0.0),
                prop("LINEAR", Some("FIGHT_PROP_ELEMENT_MASTERY"), 10.0),
                prop("LINEAR", Some(CRIT), 0.02),
            ],
            &[promote(4, "{}")],
            &table(),
        )
        .expect("profile");

        assert_eq!(profile.level_stats().len(), 3);
        assert_eq!(
            profile.get_substat(2, 0).expect("substat"),
            Some(("FIGHT_PROP_ELEMENT_MASTERY".to_string(), 20.0))
        );
    }

    #[test]
    fn unknown_curve_rejected_on_load() {
        let result = StatProfile::from_records(
            &[prop("MISSING", Some(BASE_HP), 1.0)],
            &[],
            &table(),
        );
        assert!(matches!(result, Err(AmberError::CurveNotFound(name)) if name == "MISSING"));
    }
}
