//! # Catalog Module
//!
//! The context object every query goes through.
//!
//! A `Catalog` wraps a `ContentSource` (the retrieval collaborator) and
//! memoizes what it builds: the curve table, both index listings, and each
//! loaded entity. Everything is built on first access and never rebuilt.
//!
//! ## Threading
//!
//! The catalog uses `OnceCell`/`RefCell` and is therefore not `Sync`.
//! Callers that want to share one across threads must serialize access
//! themselves; the model performs no locking.

use crate::character::{Character, CharacterSummary};
use crate::curve::{Curve, CurveFeed, CurveTable};
use crate::records::{RawCharacterDetail, RawCharacterIndex, RawWeaponDetail, RawWeaponIndex};
use crate::weapon::{Weapon, WeaponSummary};
use crate::AmberError;
use std::cell::{OnceCell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

// =============================================================================
// CONTENT SOURCE
// =============================================================================

/// Retrieval and decoding of raw records.
///
/// Implementors own transport, envelope handling and JSON decoding; the
/// catalog only ever sees already-typed records.
pub trait ContentSource {
    /// Every growth-curve feed, in merge order.
    fn curve_feeds(&self) -> Result<Vec<CurveFeed>, AmberError>;

    fn character_index(&self) -> Result<RawCharacterIndex, AmberError>;

    fn character_detail(&self, id: &str) -> Result<RawCharacterDetail, AmberError>;

    fn weapon_index(&self) -> Result<RawWeaponIndex, AmberError>;

    fn weapon_detail(&self, id: u32) -> Result<RawWeaponDetail, AmberError>;
}

// =============================================================================
// LOOKUP
// =============================================================================

/// How to pick an entity out of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Exact id match.
    Id(&'a str),
    /// Case-insensitive substring of the display name; first match wins.
    Name(&'a str),
}

impl Lookup<'_> {
    fn matches(&self, id: &str, name: &str) -> bool {
        match self {
            Self::Id(wanted) => id == *wanted,
            Self::Name(fragment) => name.to_lowercase().contains(&fragment.to_lowercase()),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Id(id) => format!("id {}", id),
            Self::Name(name) => format!("name matching '{}'", name),
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Memoizing front end over a `ContentSource`.
pub struct Catalog<S> {
    source: S,
    curves: OnceCell<CurveTable>,
    characters: OnceCell<Vec<CharacterSummary>>,
    weapons: OnceCell<Vec<WeaponSummary>>,
    loaded_characters: RefCell<BTreeMap<String, Rc<Character>>>,
    loaded_weapons: RefCell<BTreeMap<u32, Rc<Weapon>>>,
}

impl<S: ContentSource> Catalog<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            curves: OnceCell::new(),
            characters: OnceCell::new(),
            weapons: OnceCell::new(),
            loaded_characters: RefCell::new(BTreeMap::new()),
            loaded_weapons: RefCell::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The curve table, built from every feed on first access.
    pub fn curves(&self) -> Result<&CurveTable, AmberError> {
        if let Some(table) = self.curves.get() {
            return Ok(table);
        }
        let feeds = self.source.curve_feeds()?;
        let table = CurveTable::build(&feeds)?;
        Ok(self.curves.get_or_init(|| table))
    }

    /// Look up a curve by name.
    pub fn lookup_curve(&self, name: &str) -> Result<Arc<Curve>, AmberError> {
        self.curves()?.lookup(name)
    }

    /// All characters, in index order.
    pub fn characters(&self) -> Result<&[CharacterSummary], AmberError> {
        if let Some(list) = self.characters.get() {
            return Ok(list);
        }
        let index = self.source.character_index()?;
        let list: Vec<_> = index
            .items
            .into_iter()
            .map(|(id, raw)| CharacterSummary::from_raw(id, raw))
            .collect();
        tracing::debug!(count = list.len(), "character index loaded");
        Ok(self.characters.get_or_init(|| list))
    }

    /// All weapons, in index order.
    pub fn weapons(&self) -> Result<&[WeaponSummary], AmberError> {
        if let Some(list) = self.weapons.get() {
            return Ok(list);
        }
        let index = self.source.weapon_index()?;
        let list: Vec<_> = index
            .items
            .into_iter()
            .map(|(id, raw)| WeaponSummary::from_raw(id, raw, &index.types))
            .collect();
        tracing::debug!(count = list.len(), "weapon index loaded");
        Ok(self.weapons.get_or_init(|| list))
    }

    /// First character matching `lookup`.
    pub fn find_character(&self, lookup: Lookup<'_>) -> Result<&CharacterSummary, AmberError> {
        self.characters()?
            .iter()
            .find(|c| lookup.matches(&c.id, &c.name))
            .ok_or_else(|| AmberError::EntityNotFound(format!("character with {}", lookup.describe())))
    }

    /// First weapon matching `lookup`.
    pub fn find_weapon(&self, lookup: Lookup<'_>) -> Result<&WeaponSummary, AmberError> {
        self.weapons()?
            .iter()
            .find(|w| lookup.matches(&w.id.to_string(), &w.name))
            .ok_or_else(|| AmberError::EntityNotFound(format!("weapon with {}", lookup.describe())))
    }

    /// Load (once) the full detail record of a character.
    pub fn load_character(&self, summary: &CharacterSummary) -> Result<Rc<Character>, AmberError> {
        if let Some(loaded) = self.loaded_characters.borrow().get(&summary.id) {
            return Ok(Rc::clone(loaded));
        }
        let detail = self.source.character_detail(&summary.id)?;
        let character = Rc::new(Character::from_detail(
            summary.clone(),
            detail,
            self.curves()?,
        )?);
        self.loaded_characters
            .borrow_mut()
            .insert(summary.id.clone(), Rc::clone(&character));
        Ok(character)
    }

    /// Load (once) the full detail record of a weapon.
    pub fn load_weapon(&self, summary: &WeaponSummary) -> Result<Rc<Weapon>, AmberError> {
        if let Some(loaded) = self.loaded_weapons.borrow().get(&summary.id) {
            return Ok(Rc::clone(loaded));
        }
        let detail = self.source.weapon_detail(summary.id)?;
        let weapon = Rc::new(Weapon::from_detail(summary.clone(), detail, self.curves()?)?);
        self.loaded_weapons
            .borrow_mut()
            .insert(summary.id, Rc::clone(&weapon));
        Ok(weapon)
    }
}

// =============================================================================
// TESTS
// =============================================================================
