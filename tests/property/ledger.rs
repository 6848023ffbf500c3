use callmap::InvocationLedger;
use proptest::prelude::*;

use crate::utils::{call_script, MEMBERS};

proptest! {
    #[test]
    fn test_counts_match_recorded_calls(script in call_script()) {
        let mut ledger = InvocationLedger::new();
        for (member, args) in &script {
            ledger.record(MEMBERS[*member], args.clone());
        }

        for (i, name) in MEMBERS.iter().enumerate() {
            let expected = script.iter().filter(|(m, _)| *m == i).count();
            prop_assert_eq!(ledger.count_for(name), expected);
        }
        prop_assert_eq!(ledger.total_calls(), script.len());
    }

    #[test]
    fn test_arguments_are_kept_in_call_order(script in call_script()) {
        let mut ledger = InvocationLedger::new();
        for (member, args) in &script {
            let invocation = ledger.record(MEMBERS[*member], args.clone());
            prop_assert_eq!(ledger.arguments_for(MEMBERS[*member], invocation).unwrap(), &args[..]);
        }

        for (i, name) in MEMBERS.iter().enumerate() {
            let expected: Vec<_> = script
                .iter()
                .filter(|(m, _)| *m == i)
                .map(|(_, args)| args.clone())
                .collect();
            prop_assert_eq!(ledger.history_for(name), &expected[..]);
        }
    }

    #[test]
    fn test_out_of_range_queries_fail(script in call_script()) {
        let mut ledger = InvocationLedger::new();
        for (member, args) in &script {
            ledger.record(MEMBERS[*member], args.clone());
        }

        for name in MEMBERS {
            let count = ledger.count_for(name);
            let past_end = ledger.arguments_for(name, count + 1).unwrap_err();
            prop_assert_eq!(past_end.invocation, count + 1);
            prop_assert_eq!(past_end.received, count);
            prop_assert!(ledger.arguments_for(name, 0).is_err());
        }
    }
}
