//! Smoke test for the installed binary surface.

use assert_cmd::Command;

#[test]
fn help_lists_the_scaffolding_surface() {
    let output = Command::cargo_bin("create-content-engine")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    assert!(help.contains("[NAME]"));
    assert!(help.contains("--template"));
}

#[test]
fn source_overrides_stay_hidden() {
    let output = Command::cargo_bin("create-content-engine")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    let help = String::from_utf8_lossy(&output.stdout);
    assert!(!help.contains("--owner"));
    assert!(!help.contains("--repo"));
    assert!(!help.contains("--branch"));
}
