#![no_main]
use libfuzzer_sys::fuzz_target;
use pomxml::Configuration;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tree) = Configuration::from_fragment(s) {
            if let Ok(fragment) = tree.to_fragment() {
                let again = Configuration::from_fragment(&fragment);
                assert_eq!(again.ok(), Some(tree));
            }
        }
    }
});
