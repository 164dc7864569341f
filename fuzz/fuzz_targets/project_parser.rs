#![no_main]
use libfuzzer_sys::fuzz_target;
use pomxml::Project;
use std::str::FromStr;

fuzz_target!(|data: &[u8]| {
    if let Ok(project) = Project::from_bytes(data) {
        if let Ok(xml) = project.to_xml_string() {
            assert_eq!(Project::from_str(&xml).ok(), Some(project));
        }
    }
});
