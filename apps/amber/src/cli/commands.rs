//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Every command writes either a human-readable report or, in JSON mode, a
//! single pretty-printed JSON document.

use crate::config::AmberConfig;
use amber_core::{
    AmberError, BASE_ATTACK, BASE_DEFENSE, BASE_HP, Catalog, ContentSource, IndexDomain, Lookup,
    TierTable, render_template,
};
use serde_json::{Map, Value, json};
use std::io::Write;

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn emit<W: Write>(out: &mut W, text: &str) -> Result<(), AmberError> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| AmberError::IoError(format!("Cannot write output: {}", e)))
}

fn emit_json<W: Write>(out: &mut W, value: &Value) -> Result<(), AmberError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AmberError::IoError(format!("Cannot encode output: {}", e)))?;
    emit(out, &format!("{}\n", text))
}

fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

fn pairs_to_json(pairs: &[(String, f64)]) -> Value {
    Value::Object(
        pairs
            .iter()
            .map(|(key, value)| (key.clone(), json!(value)))
            .collect::<Map<_, _>>(),
    )
}

/// Pick the tier for a stat query.
///
/// An explicit tier wins; otherwise the lowest tier whose level cap admits
/// `level`.
fn pick_tier(tiers: &TierTable, level: usize, explicit: Option<usize>) -> Result<usize, AmberError> {
    if let Some(tier) = explicit {
        return Ok(tier);
    }
    tiers
        .tier_for_level(level)
        .ok_or_else(|| AmberError::IndexOutOfRange {
            domain: IndexDomain::Level,
            index: level,
            start: 1,
            end: tiers.max_level().map_or(1, |max| max as usize + 1),
        })
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show data directory and catalog sizes.
pub fn cmd_status<S: ContentSource, W: Write>(
    catalog: &Catalog<S>,
    config: &AmberConfig,
    json_mode: bool,
    out: &mut W,
) -> Result<(), AmberError> {
    let characters = catalog.characters()?.len();
    let weapons = catalog.weapons()?.len();
    let curves = catalog.curves()?.len();

    if json_mode {
        return emit_json(
            out,
            &json!({
                "data_dir": config.data_dir.to_string_lossy(),
                "language": config.language,
                "characters": characters,
                "weapons": weapons,
                "curves": curves
            }),
        );
    }

    let mut text = heading("Amber Catalog Status");
    text += &format!("Data Dir:   {}\n", config.data_dir.display());
    text += &format!("Language:   {}\n", config.language);
    text += "\n";
    text += &format!("Characters: {}\n", characters);
    text += &format!("Weapons:    {}\n", weapons);
    text += &format!("Curves:     {}\n", curves);
    emit(out, &text)
}

// =============================================================================
// LIST COMMANDS
// =============================================================================

/// List all characters in index order.
pub fn cmd_characters<S: ContentSource, W: Write>(
    catalog: &Catalog<S>,
    json_mode: bool,
    out: &mut W,
) -> Result<(), AmberError> {
    let characters = catalog.characters()?;

    if json_mode {
        let value = serde_json::to_value(characters)
            .map_err(|e| AmberError::IoError(format!("Cannot encode output: {}", e)))?;
        return emit_json(out, &value);
    }

    let mut text = String::new();
    for c in characters {
        text += &format!(
            "{:>10}  {}*  {:<24} {:<10} {}\n",
            c.id, c.rank, c.name, c.element, c.weapon_type
        );
    }
    emit(out, &text)
}

/// List all weapons in index order.
pub fn cmd_weapons<S: ContentSource, W: Write>(
    catalog: &Catalog<S>,
    json_mode: bool,
    out: &mut W,
) -> Result<(), AmberError> {
    let weapons = catalog.weapons()?;

    if json_mode {
        let value = serde_json::to_value(weapons)
            .map_err(|e| AmberError::IoError(format!("Cannot encode output: {}", e)))?;
        return emit_json(out, &value);
    }

    let mut text = String::new();
    for w in weapons {
        text += &format!("{:>6}  {}*  {:<32} {}\n", w.id, w.rank, w.name, w.kind);
    }
    emit(out, &text)
}

// =============================================================================
// CHARACTER COMMAND
// =============================================================================

/// Show a character's base stats at a level and tier.
pub fn cmd_character<S: ContentSource, W: Write>(
    catalog: &Catalog<S>,
    lookup: Lookup<'_>,
    level: usize,
    tier: Option<usize>,
    json_mode: bool,
    out: &mut W,
) -> Result<(), AmberError> {
    let summary = catalog.find_character(lookup)?;
    let character = catalog.load_character(summary)?;
    let tier = pick_tier(character.stats.tiers(), level, tier)?;

    let hp = character.get_hp(level, tier)?;
    let attack = character.get_attack(level, tier)?;
    let defense = character.get_defense(level, tier)?;
    let extra = character.get_extra_stats(tier)?;

    tracing::info!(id = %summary.id, level, tier, "character stats resolved");

    if json_mode {
        return emit_json(
            out,
            &json!({
                "id": summary.id,
                "name": summary.name,
                "level": level,
                "tier": tier,
                "stats": pairs_to_json(&[
                    (BASE_HP.to_string(), hp),
                    (BASE_ATTACK.to_string(), attack),
                    (BASE_DEFENSE.to_string(), defense),
                ]),
                "extra_stats": pairs_to_json(&extra)
            }),
        );
    }

    let mut text = heading(&character.to_string());
    text += &format!("Element:  {}\n", summary.element);
    text += &format!("Weapon:   {}\n", summary.weapon_type);
    text += &format!("Title:    {}\n", character.info.title);
    text += &format!("Level:    {} (tier {})\n", level, tier);
    text += "\n";
    text += &format!("HP:       {:.2}\n", hp);
    text += &format!("ATK:      {:.2}\n", attack);
    text += &format!("DEF:      {:.2}\n", defense);
    if !extra.is_empty() {
        text += "\nTier bonuses:\n";
        for (key, value) in &extra {
            text += &format!("  {}: {}\n", key, value);
        }
    }
    emit(out, &text)
}

// =============================================================================
// WEAPON COMMAND
// =============================================================================

/// Show a weapon's base attack, substat and affix text.
pub fn cmd_weapon<S: ContentSource, W: Write>(
    catalog: &Catalog<S>,
    lookup: Lookup<'_>,
    level: usize,
    tier: Option<usize>,
    refinement: usize,
    json_mode: bool,
    out: &mut W,
) -> Result<(), AmberError> {
    let summary = catalog.find_weapon(lookup)?;
    let weapon = catalog.load_weapon(summary)?;
    let tier = pick_tier(weapon.stats.tiers(), level, tier)?;

    let attack = weapon.get_base_attack(level, tier)?;
    let substat = weapon.get_substat(level, tier)?;
    let affixes: Vec<(&str, Option<&str>)> = weapon
        .affixes
        .values()
        .map(|affix| (affix.name.as_str(), affix.description(refinement)))
        .collect();

    tracing::info!(id = summary.id, level, tier, "weapon stats resolved");

    if json_mode {
        return emit_json(
            out,
            &json!({
                "id": summary.id,
                "name": summary.name,
                "type": summary.kind,
                "level": level,
                "tier": tier,
                "attack": attack,
                "substat": substat.as_ref().map(|(key, value)| json!({"key": key, "value": value})),
                "refinement": refinement,
                "affixes": affixes
                    .iter()
                    .map(|(name, text)| json!({"name": name, "description": text}))
                    .collect::<Vec<_>>()
            }),
        );
    }

    let mut text = heading(&weapon.to_string());
    text += &format!("Type:     {}\n", summary.kind);
    text += &format!("Rarity:   {}\n", summary.rank);
    text += &format!("Level:    {} (tier {})\n", level, tier);
    text += "\n";
    text += &format!("ATK:      {:.2}\n", attack);
    match &substat {
        Some((key, value)) => text += &format!("Substat:  {} = {}\n", key, value),
        None => text += "Substat:  none\n",
    }
    for (name, description) in &affixes {
        text += &format!(
            "\n{} (refinement {}):\n  {}\n",
            name,
            refinement + 1,
            description.unwrap_or("(no description)")
        );
    }
    emit(out, &text)
}

// =============================================================================
// TALENT COMMAND
// =============================================================================

/// Render every talent of a character at a talent level.
///
/// Passives print their static description; active talents print the
/// rendered promotion lines for `level`.
pub fn cmd_talent<S: ContentSource, W: Write>(
    catalog: &Catalog<S>,
    lookup: Lookup<'_>,
    level: &str,
    json_mode: bool,
    out: &mut W,
) -> Result<(), AmberError> {
    let summary = catalog.find_character(lookup)?;
    let character = catalog.load_character(summary)?;

    let mut rendered: Vec<(&str, bool, Vec<String>)> = Vec::new();
    for talent in character.talents.values() {
        let lines = if talent.is_passive() {
            talent
                .description
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        } else {
            match talent.promotion(level) {
                Some(step) => step.description()?,
                None => Vec::new(),
            }
        };
        rendered.push((talent.name.as_str(), talent.is_passive(), lines));
    }

    if json_mode {
        return emit_json(
            out,
            &json!({
                "id": summary.id,
                "name": summary.name,
                "level": level,
                "talents": rendered
                    .iter()
                    .map(|(name, passive, lines)| {
                        json!({"name": name, "passive": passive, "lines": lines})
                    })
                    .collect::<Vec<_>>()
            }),
        );
    }

    let mut text = heading(&format!("{} - talent level {}", character, level));
    for (name, passive, lines) in &rendered {
        text += &format!("\n{}{}\n", name, if *passive { " (passive)" } else { "" });
        if lines.is_empty() {
            text += "  (no data at this level)\n";
        }
        for line in lines {
            text += &format!("  {}\n", line);
        }
    }
    emit(out, &text)
}

// =============================================================================
// RENDER COMMAND
// =============================================================================

/// Render a single description template.
pub fn cmd_render<W: Write>(
    template: &str,
    params: &[f64],
    json_mode: bool,
    out: &mut W,
) -> Result<(), AmberError> {
    let rendered = render_template(template, params)?;

    if json_mode {
        return emit_json(
            out,
            &json!({
                "template": template,
                "params": params,
                "rendered": rendered
            }),
        );
    }

    emit(out, &format!("{}\n", rendered))
}

// =============================================================================
// CURVE COMMAND
// =============================================================================

/// Inspect a growth curve, optionally at one level.
pub fn cmd_curve<S: ContentSource, W: Write>(
    catalog: &Catalog<S>,
    name: &str,
    level: Option<usize>,
    json_mode: bool,
    out: &mut W,
) -> Result<(), AmberError> {
    let curve = catalog.lookup_curve(name)?;

    if let Some(level) = level {
        let multiplier = curve.multiplier(level)?;
        if json_mode {
            return emit_json(
                out,
                &json!({"name": name, "level": level, "multiplier": multiplier}),
            );
        }
        return emit(out, &format!("{} @ {}: {}\n", name, level, multiplier));
    }

    if json_mode {
        return emit_json(
            out,
            &json!({
                "name": name,
                "start_index": curve.start_index(),
                "end_index": curve.end_index(),
                "values": curve.values()
            }),
        );
    }

    let mut text = heading(name);
    text += &format!(
        "Levels:   {}..{} ({} values)\n",
        curve.start_index(),
        curve.end_index(),
        curve.values().len()
    );
    for (offset, value) in curve.values().iter().enumerate() {
        text += &format!("{:>5}  {}\n", curve.start_index() + offset, value);
    }
    emit(out, &text)
}
