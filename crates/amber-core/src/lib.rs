//! # amber-core
//!
//! Typed data model over a game-content reference feed.
//!
//! This crate turns decoded feed records into characters and weapons whose
//! stats can be queried at any level and ascension tier, and renders the
//! parameterized descriptions attached to talents.
//!
//! ## Layers
//!
//! - `curve`: growth curves and the curve table built from sparse feeds
//! - `tier` / `stats`: ascension tiers and stat resolution
//! - `template`: `{paramN:FORMAT}` placeholder rendering
//! - `records`: raw serde shapes of feed payloads
//! - `character` / `weapon`: typed entities
//! - `catalog`: memoizing front end over a `ContentSource`
//!
//! ## Constraints
//!
//! - No async, no network, no file I/O. Retrieval lives behind
//!   `ContentSource`.
//! - Curves are shared read-only (`Arc<Curve>`) once built.
//! - Every failure is a typed `AmberError`; nothing panics on bad data.

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod character;
pub mod curve;
pub mod primitives;
pub mod records;
pub mod stats;
pub mod template;
pub mod tier;
pub mod types;
pub mod weapon;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AmberError, BASE_ATTACK, BASE_DEFENSE, BASE_HP, BASE_STAT_KEYS, IndexDomain, StatMap,
    is_base_stat,
};

// =============================================================================
// RE-EXPORTS: Model
// =============================================================================

pub use catalog::{Catalog, ContentSource, Lookup};
pub use character::{
    Character, CharacterInfo, CharacterSummary, Constellation, NameCard, SpecialFood, Talent,
    TalentPromotionStep,
};
pub use curve::{Curve, CurveBucket, CurveFeed, CurveTable, CurvedValue};
pub use stats::{LevelStats, StatProfile};
pub use template::{FormatSpec, Template, render_description, render_lines, render_template};
pub use tier::{TierStep, TierTable};
pub use weapon::{Weapon, WeaponAffix, WeaponSummary};
