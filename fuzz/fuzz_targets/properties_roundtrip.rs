#![no_main]
use libfuzzer_sys::fuzz_target;
use pomxml::OrderedProperties;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(properties) = OrderedProperties::from_fragment(s) {
            if let Ok(fragment) = properties.to_fragment() {
                assert_eq!(OrderedProperties::from_fragment(&fragment).ok(), Some(properties));
            }
        }
    }
});
