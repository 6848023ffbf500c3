use callmap::{
    on_consecutive_calls, Behavior, CallMapSpec, Mapping, MemberInfo, Proxy, TargetSignature,
    Value,
};
use proptest::prelude::*;

use crate::utils::{arguments, json_value, MEMBERS};

fn stub() -> Proxy {
    let target = MEMBERS
        .iter()
        .fold(TargetSignature::class("Subject"), |target, name| {
            target.with_member(MemberInfo::new(*name))
        });
    Proxy::stub(target).unwrap()
}

fn call(proxy: &mut Proxy, member: &str, args: &[Value]) -> Value {
    proxy.invoke(member, args).unwrap().into_value().unwrap()
}

proptest! {
    #[test]
    fn test_uniform_value_answers_every_call(value in json_value(), calls in 1usize..50) {
        let mut proxy = stub();
        proxy
            .map_calls(&CallMapSpec::new().map("alpha", Behavior::value(value.clone())))
            .unwrap();

        for _ in 0..calls {
            prop_assert_eq!(call(&mut proxy, "alpha", &[]), value.clone());
        }
        prop_assert_eq!(proxy.calls_received_for("alpha").unwrap(), calls);
    }

    #[test]
    fn test_sequence_then_absent(
        values in prop::collection::vec(json_value(), 0..10),
        extra in 1usize..5,
    ) {
        let mut proxy = stub();
        proxy
            .map_calls(&CallMapSpec::new().map("beta", on_consecutive_calls(values.clone())))
            .unwrap();

        for expected in &values {
            prop_assert_eq!(&call(&mut proxy, "beta", &[]), expected);
        }
        for _ in 0..extra {
            prop_assert_eq!(call(&mut proxy, "beta", &[]), Value::Null);
        }
    }

    #[test]
    fn test_indexed_entries_resolve_by_invocation(
        entries in prop::collection::btree_map(1usize..20, json_value(), 0..6),
        args in arguments(),
    ) {
        let mut proxy = stub();
        let mapping = Mapping::indexed(
            entries
                .iter()
                .map(|(index, value)| (*index, Behavior::value(value.clone()))),
        );
        proxy
            .map_calls(&CallMapSpec::new().map("gamma", mapping))
            .unwrap();

        for invocation in 1usize..20 {
            let expected = entries.get(&invocation).cloned().unwrap_or(Value::Null);
            prop_assert_eq!(call(&mut proxy, "gamma", &args), expected);
        }
        // other members are untouched
        prop_assert_eq!(call(&mut proxy, "alpha", &args), Value::Null);
    }

    #[test]
    fn test_rebuilding_a_spec_is_idempotent(values in prop::collection::vec(json_value(), 1..6)) {
        let spec = CallMapSpec::new().map("alpha", on_consecutive_calls(values.clone()));
        let mut first = stub();
        let mut second = stub();
        first.map_calls(&spec).unwrap();
        second.map_calls(&spec).unwrap();

        for _ in 0..values.len() + 2 {
            prop_assert_eq!(call(&mut first, "alpha", &[]), call(&mut second, "alpha", &[]));
        }
    }
}
