#![no_main]

use asset_link::domain::services::source_patcher::{
    add_import, has_usage, insert_in_method, remove_lines,
};
use asset_link::domain::services::SourceLanguage;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        for language in [SourceLanguage::Java, SourceLanguage::Kotlin] {
            let statement = language.statement("Fonts.register(this, R.font.f)");
            let _ = insert_in_method(
                text,
                language,
                "MainApplication",
                "onCreate",
                &statement,
                Some("super.onCreate()"),
            );
            let _ = insert_in_method(text, language, "MainApplication", "onCreate", &statement, None);
            let _ = add_import(text, language, "com.example.Fonts");
        }
        let _ = remove_lines(text, "R.font.f)");
        let _ = has_usage(text, "Fonts");
    }
});
