//! Scenario: Legacy Project
//!
//! Journey: A project that used the old linker upgrades to asset-link.
//!
//! Steps:
//! 1. Assets are declared under `rnpm.assets` in `package.json`
//! 2. A manifest in the legacy `migIndex`/`data` shape exists
//! 3. Android fonts were copied to `assets/fonts`
//! 4. User runs `asset-link`
//!
//! Success Criteria:
//! - `package.json` declarations are honored without `asset-link.toml`
//! - Legacy fonts move to `res/font` with a font family
//! - The manifest is rewritten in the current schema

use crate::common::*;

/// SCENARIO: Legacy declarations and manifest are migrated
#[test]
fn scenario_legacy_manifest_is_migrated() {
    let env = TestEnv::builder()
        .with_android()
        .with_file(
            "package.json",
            r#"{"name": "app", "rnpm": {"assets": ["./assets/fonts"]}}"#,
        )
        .with_file("assets/fonts/Roboto.ttf", font("Roboto", 400, false))
        .with_file(
            "android/link-assets-manifest.json",
            r#"{"migIndex": 1, "data": [{"path": "./assets/fonts/Roboto.ttf", "sha1": "ignored"}]}"#,
        )
        .with_file("android/app/src/main/assets/fonts/Roboto.ttf", b"old copy")
        .build();

    let result = env.run(&[]);
    assert!(result.success, "{}", result.combined_output());

    assert!(!env
        .path("android/app/src/main/assets/fonts/Roboto.ttf")
        .exists());
    assert!(env
        .path("android/app/src/main/res/font/roboto_font.ttf")
        .exists());
    assert!(env
        .read("android/app/src/main/res/font/roboto.xml")
        .contains("@font/roboto_font"));
    assert!(env
        .read(MAIN_APPLICATION_PATH)
        .contains("addCustomFont(this, \"Roboto\", R.font.roboto);"));

    let manifest = env.read("android/link-assets-manifest.json");
    assert!(manifest.contains("\"schemaVersion\""));
    assert!(!manifest.contains("migIndex"));
    assert_eq!(
        env.manifest_paths("android"),
        vec!["assets/fonts/Roboto.ttf"]
    );
}

/// SCENARIO: Unreadable fonts fall back to the legacy assets directory
#[test]
fn scenario_unreadable_font_uses_legacy_directory() {
    let env = TestEnv::builder()
        .with_android()
        .with_config("assets = [\"assets\"]\n")
        .with_file("assets/Broken.ttf", b"not a font")
        .build();

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert!(
        result.stderr.contains("warn[font_unreadable]"),
        "stderr:\n{}",
        result.stderr
    );
    assert!(env
        .path("android/app/src/main/assets/fonts/Broken.ttf")
        .exists());
    assert!(!env.path("android/app/src/main/res/font").exists());
}
