#![no_main]

use callmap::{Behavior, CallMap, CallMapSpec, Mapping, MemberInfo, TargetSignature};
use libfuzzer_sys::fuzz_target;

// Each 9-byte chunk is a member selector followed by a little-endian u64
// invocation index, so indices near usize::MAX are reached. Index 0,
// overlapping entries and sequences running past the last index must be
// rejected without panicking.
fuzz_target!(|data: &[u8]| {
    let target = TargetSignature::class("Fuzzed")
        .with_member(MemberInfo::new("a"))
        .with_member(MemberInfo::new("b"))
        .with_member(MemberInfo::new("sealed").sealed());
    let members = ["a", "b", "sealed", "missing"];

    let spec = data.chunks(9).fold(CallMapSpec::new(), |spec, chunk| {
        let selector = usize::from(chunk[0]);
        let member = members[selector % members.len()];
        let mut raw = [0u8; 8];
        for (slot, byte) in raw.iter_mut().zip(&chunk[1..]) {
            *slot = *byte;
        }
        let index = usize::try_from(u64::from_le_bytes(raw)).unwrap_or(usize::MAX);
        let behavior = match selector / members.len() % 3 {
            0 => Behavior::value(index as u64),
            1 => Behavior::sequence([Behavior::value(index as u64), Behavior::value(0)]),
            _ => Behavior::sequence((0..selector % 5).map(|n| Behavior::value(n as u64))),
        };
        spec.map(member, Mapping::indexed([(index, behavior)]))
    });

    if let Ok(map) = CallMap::build(&spec, &target) {
        assert!(!map.has_result_for("a", 0));
        assert!(!map.has_result_for("b", 0));
        for member in ["a", "b"] {
            for invocation in [1, 2, 255, 256, usize::MAX - 1, usize::MAX] {
                let _ = map.program_for(member, invocation);
            }
        }
    }
});
