use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_asset-link"))
}

#[test]
fn help_lists_every_flag() {
    let output = bin().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--path",
        "--assets",
        "--ios-assets",
        "--android-assets",
        "--macos-assets",
        "--no-unlink",
        "--flavor",
        "--dry-run",
        "--json",
        "--verbose",
    ] {
        assert!(stdout.contains(flag), "missing {} in help:\n{}", flag, stdout);
    }
}

#[test]
fn version_prints_package_version() {
    let output = bin().arg("--version").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "got: {}", stdout);
}

#[test]
fn unknown_flag_is_rejected() {
    let output = bin().arg("--frobnicate").output().unwrap();
    assert!(!output.status.success());
}
