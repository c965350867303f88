//! # Tier Module
//!
//! Ascension tiers: discrete upgrade stages that raise the level cap and
//! grant additive stat bonuses.
//!
//! Tiers are addressed positionally `0..len`. That position is the "tier"
//! argument of every stat query.

use crate::records::RawPromote;
use crate::{AmberError, IndexDomain, StatMap, is_base_stat};
use std::collections::BTreeMap;

// =============================================================================
// TIER STEP
// =============================================================================

/// One ascension stage of a character or weapon.
#[derive(Debug, Clone, PartialEq)]
pub struct TierStep {
    /// Whether this is the entry tier (position 0).
    pub is_first: bool,
    /// Tier number as reported by the feed.
    pub tier_index: u32,
    /// Material id to count.
    pub item_cost: BTreeMap<String, u32>,
    /// Highest level reachable while at this tier.
    pub unlock_max_level: u32,
    /// Additive stat overrides granted at this tier.
    pub stats: StatMap,
    /// Account rank required to ascend into this tier.
    pub required_rank: u32,
    /// Currency spent to ascend into this tier.
    pub coin_cost: u32,
}

impl TierStep {
    /// Build a step from its raw record.
    #[must_use]
    pub fn from_raw(is_first: bool, raw: &RawPromote) -> Self {
        Self {
            is_first,
            tier_index: raw.promote_level,
            item_cost: raw.cost_items.clone().unwrap_or_default(),
            unlock_max_level: raw.unlock_max_level,
            stats: raw.add_props.clone(),
            required_rank: raw.required_player_level,
            coin_cost: raw.coin_cost,
        }
    }

    /// Additive override for `key`, zero when this tier grants none.
    #[must_use]
    pub fn stat_override(&self, key: &str) -> f64 {
        self.stats.get(key).unwrap_or(0.0)
    }

    /// Overrides for secondary stats, in feed order.
    #[must_use]
    pub fn extra_stats(&self) -> Vec<(String, f64)> {
        self.stats
            .iter()
            .filter(|(key, _)| !is_base_stat(key))
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

// =============================================================================
// TIER TABLE
// =============================================================================

/// Ordered ascension tiers of one entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TierTable {
    steps: Vec<TierStep>,
}

impl TierTable {
    /// Create a table from steps already in tier order.
    #[must_use]
    pub fn new(steps: Vec<TierStep>) -> Self {
        Self { steps }
    }

    /// Convert raw promote records. The first record is the entry tier.
    #[must_use]
    pub fn from_records(records: &[RawPromote]) -> Self {
        Self::new(
            records
                .iter()
                .enumerate()
                .map(|(i, raw)| TierStep::from_raw(i == 0, raw))
                .collect(),
        )
    }

    /// Step at position `tier`.
    ///
    /// Returns `AmberError::IndexOutOfRange` outside `[0, len)`.
    pub fn get(&self, tier: usize) -> Result<&TierStep, AmberError> {
        self.steps.get(tier).ok_or(AmberError::IndexOutOfRange {
            domain: IndexDomain::Tier,
            index: tier,
            start: 0,
            end: self.steps.len(),
        })
    }

    /// Lowest tier whose level cap admits `level`.
    #[must_use]
    pub fn tier_for_level(&self, level: usize) -> Option<usize> {
        self.steps
            .iter()
            .position(|step| step.unlock_max_level as usize >= level)
    }

    /// Level cap of the final tier.
    #[must_use]
    pub fn max_level(&self) -> Option<u32> {
        self.steps.last().map(|step| step.unlock_max_level)
    }

    /// Steps in tier order.
    pub fn iter(&self) -> impl Iterator<Item = &TierStep> {
        self.steps.iter()
    }

    /// Number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the entity has no tiers at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
