//! Scenario: First Link
//!
//! Journey: A user adds fonts and images to a fresh React Native app.
//!
//! Steps:
//! 1. User declares `assets/` in `asset-link.toml`
//! 2. User runs `asset-link`
//! 3. Fonts and images land in the iOS and Android projects
//! 4. Running again changes nothing
//!
//! Success Criteria:
//! - Xcode project references every asset; `Info.plist` lists fonts
//! - Android gets resource copies, a font family and a registration
//! - Both manifests record the declared assets

use crate::common::*;

fn app() -> TestEnv {
    TestEnv::builder()
        .with_ios()
        .with_android()
        .with_config("assets = [\"assets\"]\n")
        .with_file("assets/fonts/Lato-Regular.ttf", font("Lato", 400, false))
        .with_file("assets/fonts/Lato-BoldItalic.ttf", font("Lato", 700, true))
        .with_file("assets/images/logo.png", b"png")
        .build()
}

/// SCENARIO: Fonts and images are linked into both projects
#[test]
fn scenario_first_link_populates_native_projects() {
    let env = app();

    let result = env.run(&[]);
    assert!(result.success, "link failed:\n{}", result.combined_output());

    let project = env.read("ios/App.xcodeproj/project.pbxproj");
    assert!(project.contains("Lato-Regular.ttf in Resources"));
    assert!(project.contains("Lato-BoldItalic.ttf in Resources"));
    assert!(project.contains("logo.png in Resources"));

    let plist = env.read("ios/App/Info.plist");
    assert!(plist.contains("<key>UIAppFonts</key>"));
    assert!(plist.contains("<string>Lato-Regular.ttf</string>"));
    assert!(plist.contains("<string>Lato-BoldItalic.ttf</string>"));
    assert!(!plist.contains("logo.png"));

    assert!(env
        .path("android/app/src/main/res/drawable/logo.png")
        .exists());
    assert!(env
        .path("android/app/src/main/res/font/lato_regular.ttf")
        .exists());
    assert!(env
        .path("android/app/src/main/res/font/lato_bolditalic.ttf")
        .exists());

    let family = env.read("android/app/src/main/res/font/lato.xml");
    assert!(family.contains(
        "<font app:fontStyle=\"normal\" app:fontWeight=\"400\" app:font=\"@font/lato_regular\"/>"
    ));
    assert!(family.contains(
        "<font app:fontStyle=\"italic\" app:fontWeight=\"700\" app:font=\"@font/lato_bolditalic\"/>"
    ));

    let source = env.read(MAIN_APPLICATION_PATH);
    assert_eq!(
        source
            .matches("ReactFontManager.getInstance().addCustomFont(this, \"Lato\", R.font.lato);")
            .count(),
        1
    );

    let expected = vec![
        "assets/fonts/Lato-BoldItalic.ttf",
        "assets/fonts/Lato-Regular.ttf",
        "assets/images/logo.png",
    ];
    assert_eq!(env.manifest_paths("ios"), expected);
    assert_eq!(env.manifest_paths("android"), expected);
}

/// SCENARIO: Running twice leaves native files untouched
#[test]
fn scenario_second_run_is_up_to_date() {
    let env = app();
    assert!(env.run(&[]).success);
    let project = env.read("ios/App.xcodeproj/project.pbxproj");
    let source = env.read(MAIN_APPLICATION_PATH);

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert!(
        result.stdout.contains("Everything is up to date."),
        "stdout:\n{}",
        result.stdout
    );
    assert_eq!(env.read("ios/App.xcodeproj/project.pbxproj"), project);
    assert_eq!(env.read(MAIN_APPLICATION_PATH), source);
}

/// SCENARIO: A platform without a project directory is skipped
#[test]
fn scenario_missing_platform_is_skipped() {
    let env = app();

    let result = env.run(&[]);

    assert!(result.success);
    assert!(
        result.stdout.contains("Skipping macOS"),
        "stdout:\n{}",
        result.stdout
    );
    assert!(!env.path("macos").exists());
}
