//! # Property-Based Tests
//!
//! Curve construction, stat resolution and template rendering invariants.

use amber_core::records::{RawPromote, RawProp};
use amber_core::{
    AmberError, BASE_HP, CurveBucket, CurveFeed, CurveTable, LevelStats, StatMap, StatProfile,
    TierStep, TierTable, render_template,
};
use proptest::collection::vec;
use proptest::prelude::*;

/// Feed where `GROW_X` occupies buckets `start..start + values.len()` and a
/// filler curve keeps every earlier bucket non-empty.
fn feed_with_late_curve(start: usize, values: &[f64]) -> CurveFeed {
    (1..start + values.len())
        .map(|index| {
            let mut pairs = vec![("GROW_FILLER", 1.0)];
            if index >= start {
                pairs.push(("GROW_X", values[index - start]));
            }
            (index, CurveBucket::from_pairs(pairs))
        })
        .collect()
}

fn hp_profile(override_hp: f64, table: &CurveTable) -> StatProfile {
    let mut level_stats = LevelStats::new();
    level_stats.insert(BASE_HP, table.curved_value("GROW_X", 100.0).expect("curve"));

    let raw: RawPromote = serde_json::from_str(r#"{"unlockMaxLevel": 2}"#).expect("promote");
    let mut step = TierStep::from_raw(true, &raw);
    step.stats = StatMap::from_iter([(BASE_HP, override_hp)]);

    StatProfile::new(level_stats, TierTable::new(vec![step]))
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// A curve starts where its name first appears and keeps bucket order.
    #[test]
    fn curve_start_and_values_follow_buckets(
        start in 1usize..20,
        values in vec(0.5f64..10.0, 1..30)
    ) {
        let feed = feed_with_late_curve(start, &values);
        let table = CurveTable::build([&feed]).expect("build");
        let curve = table.lookup("GROW_X").expect("curve");

        prop_assert_eq!(curve.start_index(), start);
        prop_assert_eq!(curve.values(), values.as_slice());
    }

    /// Evaluation succeeds exactly inside `[start, start + len)`.
    #[test]
    fn evaluate_defined_exactly_on_domain(
        start in 1usize..20,
        values in vec(0.5f64..10.0, 1..30),
        level in 0usize..60
    ) {
        let feed = feed_with_late_curve(start, &values);
        let table = CurveTable::build([&feed]).expect("build");
        let value = table.curved_value("GROW_X", 2.0).expect("value");

        let inside = level >= start && level < start + values.len();
        match value.evaluate(level) {
            Ok(result) => {
                prop_assert!(inside);
                prop_assert_eq!(result, 2.0 * values[level - start]);
            }
            Err(AmberError::IndexOutOfRange { .. }) => prop_assert!(!inside),
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    /// Changing only the tier override shifts the stat by exactly the delta.
    #[test]
    fn base_stat_linear_in_override(
        values in vec(0.5f64..10.0, 1..10),
        first in -500.0f64..500.0,
        second in -500.0f64..500.0
    ) {
        let feed = feed_with_late_curve(1, &values);
        let table = CurveTable::build([&feed]).expect("build");

        let a = hp_profile(first, &table).get_hp(1, 0).expect("hp");
        let b = hp_profile(second, &table).get_hp(1, 0).expect("hp");

        prop_assert!(((b - a) - (second - first)).abs() < 1e-6);
    }

    /// Prop entries with any ordering keep feed order in the profile.
    #[test]
    fn level_stats_keep_feed_order(keys in vec("[A-Z]{3,8}", 1..8)) {
        let feed = feed_with_late_curve(1, &[1.0]);
        let table = CurveTable::build([&feed]).expect("build");
        let props: Vec<RawProp> = keys
            .iter()
            .map(|key| RawProp {
                curve: "GROW_X".to_string(),
                prop_type: Some(format!("FIGHT_PROP_{}", key)),
                init_value: 1.0,
            })
            .collect();

        let stats = LevelStats::from_props(&props, &table).expect("stats");
        let mut expected: Vec<String> = Vec::new();
        for key in &keys {
            let full = format!("FIGHT_PROP_{}", key);
            if !expected.contains(&full) {
                expected.push(full);
            }
        }
        let actual: Vec<String> = stats.iter().map(|(k, _)| k.to_string()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Text without braces renders unchanged.
    #[test]
    fn literal_text_passes_through(text in "[a-zA-Z0-9 |%.,:-]{0,64}") {
        prop_assert_eq!(render_template(&text, &[]).expect("render"), text);
    }

    /// Placeholders render independently of the literal text around them.
    #[test]
    fn placeholders_render_between_literals(
        prefix in "[a-z ]{0,12}",
        middle in "[a-z ]{0,12}",
        a in 0u32..100000,
        b in 0u32..1000
    ) {
        let source = format!("{}{{param1:F0}}{}{{param2:F1P}}", prefix, middle);
        let rendered = render_template(&source, &[f64::from(a), f64::from(b) / 1000.0])
            .expect("render");
        let expected = format!("{}{}{}{:.1}%", prefix, a, middle, f64::from(b) / 10.0);
        prop_assert_eq!(rendered, expected);
    }

    /// Indices beyond the parameter list are always rejected.
    #[test]
    fn out_of_range_index_rejected(len in 0usize..5, extra in 1usize..5) {
        let params = vec![1.0; len];
        let source = format!("{{param{}:F0}}", len + extra);
        let is_syntax_error = matches!(
            render_template(&source, &params),
            Err(AmberError::TemplateSyntaxError { .. })
        );
        prop_assert!(is_syntax_error);
    }
}

// =============================================================================
// DETERMINISTIC CHECKS
// =============================================================================

#[test]
fn profile_from_records_matches_manual_construction() {
    let feed = feed_with_late_curve(1, &[1.0, 2.0]);
    let table = CurveTable::build([&feed]).expect("build");
    let raw: RawPromote = serde_json::from_str(
        r#"{"unlockMaxLevel": 2, "addProps": {"FIGHT_PROP_BASE_HP": 25.0}}"#,
    )
    .expect("promote");

    let from_records = StatProfile::from_records(
        &[RawProp {
            curve: "GROW_X".to_string(),
            prop_type: Some(BASE_HP.to_string()),
            init_value: 100.0,
        }],
        &[raw],
        &table,
    )
    .expect("profile");

    assert_eq!(from_records, hp_profile(25.0, &table));
    assert_eq!(from_records.get_hp(2, 0).expect("hp"), 225.0);
}
