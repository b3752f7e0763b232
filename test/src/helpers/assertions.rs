/// Assert that an attribute on a set holds the expected value
#[macro_export]
macro_rules! assert_attribute_eq {
    ($set:expr, $name:expr, $expected:expr) => {
        assert_eq!(
            $set.value($name),
            Some($expected),
            "Attribute {} on AttributeSet {} does not hold the expected value",
            $name,
            $set.name()
        );
    };
}

/// Assert that the authority and replica agree on every replicated attribute
#[macro_export]
macro_rules! assert_replicas_synced {
    ($authority:expr, $replica:expr) => {
        for (index, def) in $authority.replicated_attributes() {
            assert_eq!(
                $authority.value_at(index),
                $replica.value_at(index),
                "Replicated attribute {} differs between authority and replica",
                def.name()
            );
        }
    };
}
