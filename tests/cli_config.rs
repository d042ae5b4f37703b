mod common;

use common::*;

#[test]
fn no_assets_declared_is_not_an_error() {
    let env = TestEnv::builder().with_android().build();

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stderr.contains("No assets declared"));
    assert!(!env.path("android/link-assets-manifest.json").exists());
}

#[test]
fn platform_flags_replace_config_lists() {
    let env = TestEnv::builder()
        .with_android()
        .with_config("android_assets = [\"config-assets\"]\n")
        .with_file("config-assets/a.png", b"a")
        .with_file("flag-assets/b.png", b"b")
        .build();

    let result = env.run(&["--android-assets", "flag-assets"]);
    assert!(result.success, "{}", result.combined_output());

    assert_eq!(env.manifest_paths("android"), vec!["flag-assets/b.png"]);
}

#[test]
fn path_flag_selects_the_app_root() {
    let env = TestEnv::builder()
        .with_file("nested/app/android/app/src/main/res/.keep", b"")
        .with_file("nested/app/assets/a.png", b"a")
        .with_file("nested/app/asset-link.toml", "assets = [\"assets\"]\n")
        .build();

    let result = env.run(&["-p", "nested/app"]);
    assert!(result.success, "{}", result.combined_output());

    assert!(env
        .path("nested/app/android/app/src/main/res/drawable/a.png")
        .exists());
}

#[test]
fn no_unlink_from_environment() {
    let env = TestEnv::builder()
        .with_android()
        .with_config("assets = [\"assets\"]\n")
        .with_file("assets/a.png", b"a")
        .with_file("assets/b.png", b"b")
        .build();
    assert!(env.run(&[]).success);
    env.remove("assets/b.png");

    let result = env.run_with_env(&[], &[("ASSET_LINK_NO_UNLINK", "1")]);
    assert!(result.success, "{}", result.combined_output());

    assert!(env.path("android/app/src/main/res/drawable/b.png").exists());
}

#[test]
fn ignore_patterns_from_project_and_user_config() {
    let env = TestEnv::builder()
        .with_android()
        .with_config("assets = [\"assets\"]\nignore = [\"*.psd\"]\n")
        .with_user_config("ignore = [\"drafts/\"]\n")
        .with_file("assets/a.png", b"a")
        .with_file("assets/source.psd", b"psd")
        .with_file("assets/drafts/wip.png", b"wip")
        .build();

    let result = env.run(&[]);
    assert!(result.success, "{}", result.combined_output());

    assert_eq!(env.manifest_paths("android"), vec!["assets/a.png"]);
}

#[test]
fn unknown_keys_warn_with_suggestion() {
    let env = TestEnv::builder()
        .with_android()
        .with_config("assets = [\"assets\"]\nandroid_asset = [\"x\"]\n")
        .with_file("assets/a.png", b"a")
        .build();

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert!(
        result.stderr.contains("warn[unknown_config_key]"),
        "stderr:\n{}",
        result.stderr
    );
    assert!(result.stderr.contains("did you mean 'android_assets'?"));
}

#[test]
fn invalid_config_fails() {
    let env = TestEnv::builder()
        .with_android()
        .with_config("assets = [\n")
        .build();

    let result = env.run(&[]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("Failed to load configuration"),
        "stderr:\n{}",
        result.stderr
    );
}

#[test]
fn unknown_flavor_leaves_the_project_alone() {
    let env = TestEnv::builder()
        .with_ios()
        .with_config("assets = [\"assets\"]\n")
        .with_file("assets/a.png", b"a")
        .build();

    let result = env.run(&["--flavor", "Missing"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(
        result.stderr.contains("warn[project_missing]"),
        "stderr:\n{}",
        result.stderr
    );
    assert_eq!(
        env.read("ios/App.xcodeproj/project.pbxproj"),
        PROJECT_PBXPROJ
    );
}

#[test]
fn flavor_links_into_its_clients_group() {
    let env = TestEnv::builder()
        .with_ios()
        .with_config("assets = [\"assets\"]\n")
        .with_file("assets/a.png", b"a")
        .build();

    let result = env.run_with_env(&[], &[("ASSET_LINK_IOS_TARGET", "App")]);

    assert!(result.success, "{}", result.combined_output());
    let project = env.read("ios/App.xcodeproj/project.pbxproj");
    assert!(project.contains("/* Clients */"));
    assert!(project.contains("a.png in Resources"));
}
