#![no_main]

use callmap::scenario::Scenario;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(toml_str) = std::str::from_utf8(data) {
        if let Ok(scenario) = Scenario::from_toml_str(toml_str) {
            let _ = scenario.call_map_spec();
        }
    }
});
