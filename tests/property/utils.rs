use proptest::prelude::*;
use serde_json::{Number, Value};

pub const MEMBERS: [&str; 3] = ["alpha", "beta", "gamma"];

/// Arbitrary JSON values, nested a few levels deep.
pub fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| Value::Number(Number::from(i))),
        "[a-z]{0,8}".prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

pub fn arguments() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(json_value(), 0..4)
}

/// A script of calls: which member, with which arguments.
pub fn call_script() -> impl Strategy<Value = Vec<(usize, Vec<Value>)>> {
    prop::collection::vec((0..MEMBERS.len(), arguments()), 0..40)
}
