//! Property tests for source text patching.

use proptest::prelude::*;

use asset_link::domain::services::source_patcher::{
    add_import, insert_in_method, remove_lines,
};
use asset_link::domain::services::{PatchOutcome, SourceLanguage};

fn language() -> impl Strategy<Value = SourceLanguage> {
    prop_oneof![Just(SourceLanguage::Java), Just(SourceLanguage::Kotlin)]
}

/// A small `MainApplication` with random filler statements in `onCreate`
fn application(language: SourceLanguage) -> impl Strategy<Value = String> {
    let statement = prop::sample::select(vec![
        "SoLoader.init(this, false)",
        "initializeFlipper(this)",
        "String s = \"}{\"",
        "// }",
        "log(\"onCreate\")",
    ]);
    prop::collection::vec(statement, 0..4).prop_map(move |body| {
        let terminator = language.terminator();
        let lines: String = body
            .iter()
            .map(|s| format!("    {}{}\n", s, terminator))
            .collect();
        match language {
            SourceLanguage::Java => format!(
                "package com.example;\n\nimport android.app.Application;\n\npublic class MainApplication extends Application {{\n  @Override\n  public void onCreate() {{\n    super.onCreate();\n{}  }}\n}}\n",
                lines
            ),
            SourceLanguage::Kotlin => format!(
                "package com.example\n\nimport android.app.Application\n\nclass MainApplication : Application() {{\n  override fun onCreate() {{\n    super.onCreate()\n{}  }}\n}}\n",
                lines
            ),
        }
    })
}

fn source() -> impl Strategy<Value = (SourceLanguage, String)> {
    language().prop_flat_map(|language| (Just(language), application(language)))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Patching arbitrary text never panics.
    #[test]
    fn property_patcher_never_panics(text in "(?s).{0,512}", java in any::<bool>()) {
        let language = if java { SourceLanguage::Java } else { SourceLanguage::Kotlin };
        let _ = insert_in_method(&text, language, "MainApplication", "onCreate", "register()", Some("super.onCreate()"));
        let _ = insert_in_method(&text, language, "MainApplication", "onCreate", "register()", None);
        let _ = add_import(&text, language, "com.example.Thing");
        let _ = remove_lines(&text, "register()");
    }

    /// PROPERTY: Inserting then removing a registration restores the source.
    #[test]
    fn property_insert_then_remove_restores((language, text) in source()) {
        let statement = language.statement("Fonts.register(this, R.font.lato)");
        let inserted = insert_in_method(&text, language, "MainApplication", "onCreate", &statement, Some("super.onCreate()"));
        prop_assert!(inserted.is_changed());
        let patched = inserted.into_text(&text);
        prop_assert!(patched.contains(&statement));

        let restored = remove_lines(&patched, "R.font.lato)").into_text(&patched);
        prop_assert_eq!(restored, text);
    }

    /// PROPERTY: Inserting the same statement twice is a no-op the second time.
    #[test]
    fn property_insert_is_idempotent((language, text) in source()) {
        let statement = language.statement("Fonts.register(this, R.font.lato)");
        let once = insert_in_method(&text, language, "MainApplication", "onCreate", &statement, Some("super.onCreate()"))
            .into_text(&text);
        let twice = insert_in_method(&once, language, "MainApplication", "onCreate", &statement, Some("super.onCreate()"));
        prop_assert_eq!(twice, PatchOutcome::Unchanged);
    }

    /// PROPERTY: A sibling class declaring the same method is never patched.
    #[test]
    fn property_sibling_class_is_untouched((language, text) in source()) {
        let sibling = match language {
            SourceLanguage::Java => "\nclass Helper {\n  public void onCreate() {\n    super.onCreate();\n  }\n}\n",
            SourceLanguage::Kotlin => "\nclass Helper {\n  fun onCreate() {\n    super.onCreate()\n  }\n}\n",
        };
        let statement = language.statement("Fonts.register(this, R.font.lato)");
        for source in [format!("{}{}", sibling, text), format!("{}{}", text, sibling)] {
            let patched = insert_in_method(&source, language, "MainApplication", "onCreate", &statement, Some("super.onCreate()"))
                .into_text(&source);
            prop_assert!(patched.contains(sibling));
            prop_assert_eq!(patched.matches(statement.as_str()).count(), 1);
        }
    }

    /// PROPERTY: Adding then removing an import restores the source.
    #[test]
    fn property_import_round_trip((language, text) in source()) {
        let patched = add_import(&text, language, "com.example.Fonts").into_text(&text);
        prop_assert!(patched.contains("import com.example.Fonts"));
        let restored = remove_lines(&patched, "import com.example.Fonts").into_text(&patched);
        prop_assert_eq!(restored, text);
    }
}
