#![no_main]

use asset_link::infrastructure::android::{parse_font_family, render_font_family};
use asset_link::infrastructure::xcode::{parse_plist, render_plist};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(family) = parse_font_family(text) {
            let _ = render_font_family(&family);
        }
        if let Ok(plist) = parse_plist(text) {
            let _ = render_plist(&plist);
        }
    }
});
