#![no_main]

use asset_link::config::ProjectConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config TOML parsing should never panic
        let _ = toml::from_str::<ProjectConfig>(content);
    }
});
