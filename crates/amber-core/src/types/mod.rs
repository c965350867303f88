//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the Amber model:
//! - Stat keys and the base-stat classification (`BASE_HP`, `is_base_stat`)
//! - Ordered stat maps (`StatMap`)
//! - Error types (`AmberError`, `IndexDomain`)
//!
//! ## Ordering Guarantees
//!
//! Upstream records carry stat maps whose key order is meaningful (the first
//! non-base curve stat of a weapon is its substat). `StatMap` keeps the order
//! in which keys were decoded instead of re-sorting them.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// STAT KEYS
// =============================================================================

/// Stat key for base health.
pub const BASE_HP: &str = "FIGHT_PROP_BASE_HP";

/// Stat key for base attack.
pub const BASE_ATTACK: &str = "FIGHT_PROP_BASE_ATTACK";

/// Stat key for base defense.
pub const BASE_DEFENSE: &str = "FIGHT_PROP_BASE_DEFENSE";

/// The three fundamental combat stats. Everything else is a secondary stat.
pub const BASE_STAT_KEYS: [&str; 3] = [BASE_HP, BASE_ATTACK, BASE_DEFENSE];

/// Returns true if `key` is one of the three base stats.
#[must_use]
pub fn is_base_stat(key: &str) -> bool {
    BASE_STAT_KEYS.contains(&key)
}

// =============================================================================
// STAT MAP
// =============================================================================

/// An insertion-ordered mapping from stat key to value.
///
/// Inserting an existing key replaces its value in place, keeping its
/// original position. Upstream sends `null` where a tier grants no stats;
/// that decodes as an empty map.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct StatMap(IndexMap<String, f64>);

impl StatMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    /// Get the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for StatMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'de> Deserialize<'de> for StatMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<IndexMap<String, f64>>::deserialize(deserializer)
            .map(|map| Self(map.unwrap_or_default()))
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Which data-defined domain an out-of-range index belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexDomain {
    /// A level looked up on a growth curve.
    Level,
    /// An ascension tier looked up on a tier table.
    Tier,
}

impl fmt::Display for IndexDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level => f.write_str("level"),
            Self::Tier => f.write_str("tier"),
        }
    }
}

/// Errors that can occur in the Amber model.
///
/// - No silent failures and no degraded results
/// - Use `Result<T, AmberError>` for fallible operations
/// - Nothing is retried internally; the core performs no I/O
#[derive(Debug, Error)]
pub enum AmberError {
    /// The curve name was never observed while building the curve table.
    #[error("Curve not found: {0}")]
    CurveNotFound(String),

    /// The entity has no curve-backed value for the requested stat.
    #[error("Stat not found: {0}")]
    StatNotFound(String),

    /// A level or tier index lies outside its data-defined range.
    #[error("{domain} {index} out of range [{start}, {end})")]
    IndexOutOfRange {
        domain: IndexDomain,
        index: usize,
        start: usize,
        end: usize,
    },

    /// A description template contains a malformed placeholder.
    #[error("Template syntax error: {reason} in `{fragment}`")]
    TemplateSyntaxError { reason: String, fragment: String },

    /// A decoded record violates a structural rule of the model.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// No entity matched a catalog lookup.
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// The retrieval collaborator failed to produce a record.
    #[error("Source error: {0}")]
    SourceError(String),

    /// An I/O error occurred in a collaborator.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl AmberError {
    /// Shorthand for a template syntax error.
    pub(crate) fn template(reason: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self::TemplateSyntaxError {
            reason: reason.into(),
            fragment: fragment.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
