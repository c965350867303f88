//! # Model Primitives
//!
//! Fixed constants of the upstream content feed.
//!
//! These values describe the shape of the data, not tuning knobs. They are
//! compiled in and never change at runtime.

/// Number of constellation slots every character owns.
///
/// Slots are addressed `0..CONSTELLATION_SLOTS`; a slot the feed leaves out
/// stays `None`.
pub const CONSTELLATION_SLOTS: usize = 6;

/// Number of refinement ranks a weapon affix describes.
///
/// Ranks are addressed `0..REFINEMENT_RANKS`.
pub const REFINEMENT_RANKS: usize = 5;

/// Talent type code for the elemental burst.
pub const TALENT_TYPE_BURST: u8 = 1;

/// Talent type code for passives. Passives carry no promotions.
pub const TALENT_TYPE_PASSIVE: u8 = 2;

/// Icon prefix identifying a normal attack talent.
pub const NORMAL_ATTACK_ICON_PREFIX: &str = "Skill_A";

/// Icon prefix identifying an elemental skill talent.
pub const SKILL_ICON_PREFIX: &str = "Skill_S";

/// Keyword every description placeholder starts with (`{param1:F1P}`).
pub const PLACEHOLDER_KEYWORD: &str = "param";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_counts() {
        assert_eq!(CONSTELLATION_SLOTS, 6);
        assert_eq!(REFINEMENT_RANKS, 5);
    }

    #[test]
    fn talent_codes_distinct() {
        assert_ne!(TALENT_TYPE_BURST, TALENT_TYPE_PASSIVE);
    }
}
