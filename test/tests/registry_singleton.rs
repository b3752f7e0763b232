/// The process-wide meta-attribute registry.
///
/// Every test in this binary shares one global registry, so each test that
/// registers uses keys no other test touches.
use std::thread;

use gasplus_shared::{
    MetaAttributeDefinition, MetaAttributeRegistry, RegistryPlugin, DAMAGE_KEY, HEAL_KEY,
    SHIELD_DELTA_KEY,
};
use gasplus_test::init_logging;

struct ElementalPlugin;

impl RegistryPlugin for ElementalPlugin {
    fn build(&self, registry: &MetaAttributeRegistry) {
        registry.register_extension(MetaAttributeDefinition::new(
            "LightningDamage",
            DAMAGE_KEY,
            "Lightning damage routed through the damage channel.",
        ));
    }
}

#[test]
fn sequential_access_returns_same_instance() {
    init_logging();
    let first = MetaAttributeRegistry::global();
    let second = MetaAttributeRegistry::global();

    assert!(std::ptr::eq(first, second));
}

#[test]
fn builtins_are_present_on_first_access() {
    let registry = MetaAttributeRegistry::global();

    for key in [DAMAGE_KEY, HEAL_KEY, SHIELD_DELTA_KEY] {
        let definition = registry.required(key);
        assert_eq!(definition.key, key);
        assert_eq!(definition.backing_attribute, key);
        assert!(!definition.description.is_empty());
    }
}

#[test]
fn builtins_cannot_be_replaced() {
    let registry = MetaAttributeRegistry::global();

    assert!(!registry.register(MetaAttributeDefinition::new(
        HEAL_KEY,
        "Mana",
        "Healing that restores mana instead.",
    )));

    assert_eq!(
        registry.heal().description,
        "Aggregates incoming healing before it is applied to core attributes."
    );
}

#[test]
fn extension_registered_on_one_thread_is_visible_on_another() {
    let registry = MetaAttributeRegistry::global();

    thread::spawn(|| {
        MetaAttributeRegistry::global().add_plugin(ElementalPlugin);
    })
    .join()
    .unwrap();

    assert_eq!(
        registry.resolve("LightningDamage"),
        Some(DAMAGE_KEY.into())
    );
}

#[test]
fn concurrent_registration_keeps_first_winner() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                MetaAttributeRegistry::global().register(MetaAttributeDefinition::new(
                    "ThornsReflect",
                    format!("Thorns{}", i),
                    "Damage reflected back to attackers.",
                ))
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|registered| *registered)
        .count();

    assert_eq!(winners, 1);
    let definition = MetaAttributeRegistry::global().required("ThornsReflect");
    assert!(definition.backing_attribute.as_str().starts_with("Thorns"));
}
