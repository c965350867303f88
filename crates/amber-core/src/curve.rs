//! # Curve Module
//!
//! Growth curves and the curve table they live in.
//!
//! Upstream growth data arrives as feeds of buckets, one bucket per level:
//!
//! ```text
//! bucket 1: { GROW_CURVE_HP_S4: 1.000, GROW_CURVE_ATTACK_101: 1.000 }
//! bucket 2: { GROW_CURVE_HP_S4: 1.083, GROW_CURVE_ATTACK_101: 1.074 }
//! ...
//! ```
//!
//! The table turns that transposed layout back into one multiplier sequence
//! per curve name. A curve's `start_index` is the bucket where its name was
//! first seen, so `values[i]` applies at level `start_index + i`.
//!
//! Curves are immutable after construction and handed out as `Arc<Curve>`,
//! so every `CurvedValue` shares the table's copy.

use crate::{AmberError, IndexDomain};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

// =============================================================================
// CURVE
// =============================================================================

/// A per-level multiplier table.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    values: Vec<f64>,
    start_index: usize,
}

impl Curve {
    /// Create a curve whose first value applies at `start_index`.
    #[must_use]
    pub fn new(values: Vec<f64>, start_index: usize) -> Self {
        Self {
            values,
            start_index,
        }
    }

    /// The multiplier sequence in level order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First level this curve defines.
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// One past the last level this curve defines.
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.start_index + self.values.len()
    }

    /// Check whether `level` lies inside the curve's domain.
    #[must_use]
    pub fn contains(&self, level: usize) -> bool {
        (self.start_index..self.end_index()).contains(&level)
    }

    /// Multiplier at an absolute level.
    ///
    /// Returns `AmberError::IndexOutOfRange` outside
    /// `[start_index, start_index + len)`.
    pub fn multiplier(&self, level: usize) -> Result<f64, AmberError> {
        level
            .checked_sub(self.start_index)
            .and_then(|offset| self.values.get(offset))
            .copied()
            .ok_or(AmberError::IndexOutOfRange {
                domain: IndexDomain::Level,
                index: level,
                start: self.start_index,
                end: self.end_index(),
            })
    }

    /// Scale `initial` by the multiplier at `level`.
    pub fn curve_value(&self, level: usize, initial: f64) -> Result<f64, AmberError> {
        Ok(self.multiplier(level)? * initial)
    }
}

// =============================================================================
// CURVED VALUE
// =============================================================================

/// A scalar that grows along a shared curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvedValue {
    initial: f64,
    curve: Arc<Curve>,
}

impl CurvedValue {
    /// Pair an initial value with a curve from the table.
    #[must_use]
    pub fn new(initial: f64, curve: Arc<Curve>) -> Self {
        Self { initial, curve }
    }

    /// The value at the curve's reference multiplier of 1.
    #[must_use]
    pub fn initial(&self) -> f64 {
        self.initial
    }

    /// The curve this value follows.
    #[must_use]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// `initial * multiplier(level)`.
    pub fn evaluate(&self, level: usize) -> Result<f64, AmberError> {
        self.curve.curve_value(level, self.initial)
    }
}

// =============================================================================
// FEEDS
// =============================================================================

/// One level's worth of multipliers, keyed by curve name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurveBucket {
    #[serde(rename = "curveInfos", default)]
    pub curve_infos: BTreeMap<String, f64>,
}

impl CurveBucket {
    /// Build a bucket from `(name, multiplier)` pairs.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self {
            curve_infos: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A sparse, index-keyed sequence of buckets from one upstream feed.
///
/// Valid range: from the first index holding a non-empty bucket through the
/// last index of the contiguous run that follows it. Anything after the
/// first hole is outside the feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CurveFeed {
    buckets: BTreeMap<usize, CurveBucket>,
}

impl CurveFeed {
    /// Create an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a bucket at `index`.
    pub fn insert(&mut self, index: usize, bucket: CurveBucket) {
        self.buckets.insert(index, bucket);
    }

    /// Number of buckets held, including any past the valid range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if the feed holds no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterate the valid contiguous run of buckets with their indices.
    pub fn run(&self) -> impl Iterator<Item = (usize, &CurveBucket)> {
        let mut live = self
            .buckets
            .iter()
            .filter(|(_, bucket)| !bucket.curve_infos.is_empty())
            .map(|(index, bucket)| (*index, bucket))
            .peekable();
        let mut expected = live.peek().map(|(index, _)| *index);

        std::iter::from_fn(move || {
            let want = expected?;
            match live.next() {
                Some((index, bucket)) if index == want => {
                    expected = Some(index + 1);
                    Some((index, bucket))
                }
                _ => {
                    expected = None;
                    None
                }
            }
        })
    }
}

impl FromIterator<(usize, CurveBucket)> for CurveFeed {
    fn from_iter<I: IntoIterator<Item = (usize, CurveBucket)>>(iter: I) -> Self {
        Self {
            buckets: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// CURVE TABLE
// =============================================================================

/// Curve under construction within a single feed.
struct PendingCurve {
    start_index: usize,
    last_index: usize,
    values: Vec<f64>,
}

/// Named curves merged from one or more feeds.
#[derive(Debug, Clone, Default)]
pub struct CurveTable {
    curves: BTreeMap<String, Arc<Curve>>,
}

impl CurveTable {
    /// Build a table by merging feeds in order.
    ///
    /// Curve names are feed-agnostic. A name already defined by an earlier
    /// feed keeps its first definition; later occurrences are ignored. A
    /// curve that skips a bucket and then reappears is rejected with
    /// `AmberError::InvalidRecord`.
    pub fn build<'a>(feeds: impl IntoIterator<Item = &'a CurveFeed>) -> Result<Self, AmberError> {
        let mut table = Self::default();
        let mut feed_count = 0usize;

        for feed in feeds {
            table.merge_feed(feed)?;
            feed_count += 1;
        }

        tracing::debug!(
            curves = table.curves.len(),
            feeds = feed_count,
            "curve table built"
        );
        Ok(table)
    }

    fn merge_feed(&mut self, feed: &CurveFeed) -> Result<(), AmberError> {
        let mut pending: BTreeMap<String, PendingCurve> = BTreeMap::new();
        let mut shadowed: BTreeSet<&str> = BTreeSet::new();

        for (index, bucket) in feed.run() {
            for (name, &multiplier) in &bucket.curve_infos {
                if self.curves.contains_key(name) {
                    shadowed.insert(name);
                    continue;
                }

                match pending.get_mut(name) {
                    Some(curve) => {
                        if curve.last_index + 1 != index {
                            return Err(AmberError::InvalidRecord(format!(
                                "curve {} resumes at bucket {} after a gap (last seen at {})",
                                name, index, curve.last_index
                            )));
                        }
                        curve.values.push(multiplier);
                        curve.last_index = index;
                    }
                    None => {
                        pending.insert(
                            name.clone(),
                            PendingCurve {
                                start_index: index,
                                last_index: index,
                                values: vec![multiplier],
                            },
                        );
                    }
                }
            }
        }

        if !shadowed.is_empty() {
            tracing::warn!(
                count = shadowed.len(),
                "feed redefines curves from an earlier feed; keeping first definitions"
            );
        }

        for (name, curve) in pending {
            self.curves.insert(
                name,
                Arc::new(Curve::new(curve.values, curve.start_index)),
            );
        }
        Ok(())
    }

    /// Look up a curve by name.
    ///
    /// Returns `AmberError::CurveNotFound` if the name was never observed.
    pub fn lookup(&self, name: &str) -> Result<Arc<Curve>, AmberError> {
        self.curves
            .get(name)
            .cloned()
            .ok_or_else(|| AmberError::CurveNotFound(name.to_string()))
    }

    /// Pair `initial` with the named curve.
    pub fn curved_value(&self, name: &str, initial: f64) -> Result<CurvedValue, AmberError> {
        Ok(CurvedValue::new(initial, self.lookup(name)?))
    }

    /// Curve names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    /// Number of curves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Check if the table holds no curves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
