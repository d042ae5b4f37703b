#![no_main]

use asset_link::infrastructure::xcode::XcodeProject;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Parsing and editing must fail cleanly, never panic
        if let Ok(mut project) = XcodeProject::parse(text) {
            assert_eq!(project.to_string(), text);
            if project.ensure_group("Resources").is_ok() {
                let _ = XcodeProject::parse(project.to_string());
            }
        }
    }
});
