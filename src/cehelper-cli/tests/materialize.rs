//! Materialization: locating the extracted snapshot root and copying the
//! chosen template into the destination directory.
//!
//! These tests run against a committed fixture tree shaped like an
//! extracted branch snapshot, so no network or archive handling is
//! involved.

use cehelper_cli::{copy_template, locate_template};
use std::fs;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests/fixtures")
}

#[test]
fn locates_a_template_inside_the_snapshot_root() {
    let extract_dir = fixtures_dir().join("snapshot");
    let template_dir = locate_template(&extract_dir, "content-engine", "vanilla-ts").unwrap();
    assert!(template_dir.ends_with("content-engine-main/templates/vanilla-ts"));
}

#[test]
fn missing_snapshot_root_is_an_error() {
    let extract_dir = fixtures_dir().join("no-snapshot");
    let err = locate_template(&extract_dir, "content-engine", "vanilla-ts").unwrap_err();
    assert!(err.to_string().contains("Could not find extracted folder"));
}

#[test]
fn missing_template_error_names_the_template() {
    let extract_dir = fixtures_dir().join("snapshot");
    let err = locate_template(&extract_dir, "content-engine", "does-not-exist").unwrap_err();
    assert!(err.to_string().contains("Template not found: does-not-exist"));
}

#[test]
fn copies_the_template_tree_byte_for_byte() {
    let extract_dir = fixtures_dir().join("snapshot");
    let template_dir = locate_template(&extract_dir, "content-engine", "vanilla-ts").unwrap();

    let scratch = tempfile::tempdir().unwrap();
    let dest = scratch.path().join("my-site");
    copy_template(&template_dir, &dest).unwrap();

    for relative in ["index.html", "package.json", "src/main.ts"] {
        let expected = fs::read(template_dir.join(relative)).unwrap();
        let actual = fs::read(dest.join(relative)).unwrap();
        assert_eq!(actual, expected, "{relative} differs after copy");
    }
}

#[test]
fn copying_into_an_existing_directory_merges() {
    let extract_dir = fixtures_dir().join("snapshot");
    let template_dir = locate_template(&extract_dir, "content-engine", "vanilla-ts").unwrap();

    let scratch = tempfile::tempdir().unwrap();
    let dest = scratch.path().join("my-site");
    fs::create_dir_all(dest.join("notes")).unwrap();
    fs::write(dest.join("notes/keep.txt"), "keep me").unwrap();

    copy_template(&template_dir, &dest).unwrap();

    assert_eq!(
        fs::read_to_string(dest.join("notes/keep.txt")).unwrap(),
        "keep me"
    );
    assert!(dest.join("index.html").is_file());
}

#[test]
fn nested_destination_parents_are_created() {
    let extract_dir = fixtures_dir().join("snapshot");
    let template_dir = locate_template(&extract_dir, "content-engine", "blog-starter").unwrap();

    let scratch = tempfile::tempdir().unwrap();
    let dest = scratch.path().join("sites/client/blog");
    copy_template(&template_dir, &dest).unwrap();

    assert!(dest.join("package.json").is_file());
}
