/// PROPERTY-BASED TESTS: clamping invariants
///
/// Key invariants:
/// 1. Every accepted value equals max(lo, min(hi, proposed))
/// 2. No committed value is ever observable outside its bounds
/// 3. Pre-change hooks run before the clamp, never after
use gasplus_shared::{presets, AttributeDef, AttributeSet, AttributeSetSchema, ClampRange};
use gasplus_test::RecordingHooks;
use proptest::prelude::*;

fn finite_value() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6f32
}

proptest! {
    #[test]
    fn prop_pre_change_matches_clamp_formula(proposed in finite_value()) {
        let mut set = AttributeSet::authority(presets::primary_attribute_set().unwrap());

        let accepted = set.pre_change("Health", proposed);

        prop_assert_eq!(accepted, 0.0f32.max(100.0f32.min(proposed)));
    }

    #[test]
    fn prop_committed_values_stay_in_bounds(
        proposals in prop::collection::vec(finite_value(), 1..20),
    ) {
        let schema = presets::primary_attribute_set().unwrap();
        let mut set = AttributeSet::authority(schema.clone());

        for proposed in proposals {
            set.apply_change("Mana", proposed);
            set.apply_change("Stamina", proposed);

            for (index, def) in schema.attributes().iter().enumerate() {
                let value = set.value_at(index as u8).unwrap();
                prop_assert!(
                    def.clamp_range().contains(value),
                    "{} = {} escaped its bounds",
                    def.name(),
                    value
                );
            }
        }
    }

    #[test]
    fn prop_hook_adjustment_is_clamped(proposed in finite_value(), factor in -4.0f32..4.0f32) {
        let schema = presets::primary_attribute_set().unwrap();
        let mut set = AttributeSet::authority(schema).with_hooks(RecordingHooks::scaled(factor));

        let update = set.try_apply_change("Health", proposed).unwrap();

        prop_assert_eq!(update.new, 0.0f32.max(100.0f32.min(proposed * factor)));
    }

    #[test]
    fn prop_valid_ranges_contain_their_output(
        lo in finite_value(),
        width in 0.0f32..1.0e6f32,
        proposed in finite_value(),
    ) {
        let range = ClampRange::new(Some(lo), Some(lo + width)).unwrap();

        prop_assert!(range.contains(range.apply(proposed)));
    }
}

#[test]
fn boundaries_are_inclusive() {
    let mut set = AttributeSet::authority(presets::primary_attribute_set().unwrap());

    assert_eq!(set.pre_change("Health", 0.0), 0.0);
    assert_eq!(set.pre_change("Health", 100.0), 100.0);
}

#[test]
fn one_sided_range_bounds_only_that_side() {
    let schema = AttributeSetSchema::builder("Combat")
        .add_attribute(AttributeDef::new("AttackPower").clamp_min(0.0).unwrap())
        .build()
        .unwrap();
    let mut set = AttributeSet::authority(schema);

    assert_eq!(set.pre_change("AttackPower", -3.0), 0.0);
    assert_eq!(set.pre_change("AttackPower", 1.0e9), 1.0e9);
}
