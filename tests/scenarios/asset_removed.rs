//! Scenario: Asset Removed
//!
//! Journey: A user deletes a font and an image they no longer ship.
//!
//! Steps:
//! 1. User links a font and two images
//! 2. User deletes the font and one image from `assets/`
//! 3. User runs `asset-link` again
//!
//! Success Criteria:
//! - Native projects no longer reference the deleted assets
//! - Android font family and registration are retracted
//! - `--no-unlink` keeps everything in place

use crate::common::*;

fn linked_app() -> TestEnv {
    let env = TestEnv::builder()
        .with_ios()
        .with_android()
        .with_config("assets = [\"assets\"]\n")
        .with_file("assets/Inter.ttf", font("Inter", 400, false))
        .with_file("assets/logo.png", b"logo")
        .with_file("assets/splash.png", b"splash")
        .build();
    let result = env.run(&[]);
    assert!(result.success, "initial link failed:\n{}", result.combined_output());
    env
}

/// SCENARIO: Deleted assets are unlinked everywhere
#[test]
fn scenario_deleted_assets_are_unlinked() {
    let env = linked_app();
    env.remove("assets/Inter.ttf");
    env.remove("assets/splash.png");

    let result = env.run(&[]);
    assert!(result.success, "{}", result.combined_output());

    let project = env.read("ios/App.xcodeproj/project.pbxproj");
    assert!(!project.contains("Inter.ttf"));
    assert!(!project.contains("splash.png"));
    assert!(project.contains("logo.png in Resources"));
    assert!(!env.read("ios/App/Info.plist").contains("Inter.ttf"));

    assert!(!env.path("android/app/src/main/res/drawable/splash.png").exists());
    assert!(!env.path("android/app/src/main/res/font/inter.xml").exists());
    assert!(!env.path("android/app/src/main/res/font/inter_font.ttf").exists());
    assert_eq!(env.read(MAIN_APPLICATION_PATH), MAIN_APPLICATION_JAVA);

    assert_eq!(env.manifest_paths("android"), vec!["assets/logo.png"]);
    assert_eq!(env.manifest_paths("ios"), vec!["assets/logo.png"]);
}

/// SCENARIO: --no-unlink keeps deleted assets linked
#[test]
fn scenario_no_unlink_keeps_assets() {
    let env = linked_app();
    env.remove("assets/splash.png");

    let result = env.run(&["--no-unlink"]);
    assert!(result.success, "{}", result.combined_output());

    assert!(env.path("android/app/src/main/res/drawable/splash.png").exists());
    assert!(env
        .read("ios/App.xcodeproj/project.pbxproj")
        .contains("splash.png in Resources"));
    assert_eq!(
        env.manifest_paths("android"),
        vec!["assets/Inter.ttf", "assets/logo.png"]
    );
}

/// SCENARIO: Replacing an image's content relinks it
#[test]
fn scenario_changed_asset_is_replaced() {
    let env = linked_app();
    env.write("assets/logo.png", b"new logo");

    let result = env.run(&[]);
    assert!(result.success, "{}", result.combined_output());

    assert_eq!(
        std::fs::read(env.path("android/app/src/main/res/drawable/logo.png")).unwrap(),
        b"new logo"
    );
    assert_eq!(
        env.read("ios/App.xcodeproj/project.pbxproj")
            .matches("logo.png in Resources */,")
            .count(),
        1
    );
}
