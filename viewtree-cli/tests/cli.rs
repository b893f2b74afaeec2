use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `contents` to `name` inside a fresh temp dir, returning both.
fn source_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write source");
    (dir, path)
}

#[test]
fn prints_simple_tokens_by_default() {
    let (dir, path) = source_file("app.view.tree", "a\n\tb\n");
    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.current_dir(dir.path()).arg(&path);

    let expected = "0..1 Identifier \"a\"\n\
                    1..2 LINE_BREAK\n\
                    3..3 INDENT_OPEN\n\
                    3..4 Identifier \"b\"\n\
                    4..5 LINE_BREAK\n\
                    5..5 LINE_BREAK\n\
                    5..5 INDENT_CLOSE\n";
    cmd.assert().success().stdout(expected);
}

#[test]
fn structure_format_with_overrides() {
    let (dir, path) = source_file("app.view.tree", "a\n\tb\n");
    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.current_dir(dir.path())
        .arg(&path)
        .arg("--format")
        .arg("structure")
        .arg("--set")
        .arg("scanner.final_line_break=when-missing");

    cmd.assert()
        .success()
        .stdout("LINE_BREAK INDENT_OPEN LINE_BREAK INDENT_CLOSE\n");
}

#[test]
fn json_and_yaml_formats() {
    let (dir, path) = source_file("app.view.tree", "$app\n\ttitle\n");

    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.current_dir(dir.path()).arg(&path).arg("-f").arg("token-json");
    cmd.assert().success().stdout(
        predicate::str::contains("\"Scanned\": \"INDENT_OPEN\"")
            .and(predicate::str::contains("\"Content\": \"ComponentName\"")),
    );

    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.current_dir(dir.path()).arg(&path).arg("-f").arg("token-yaml");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("INDENT_CLOSE"));
}

#[test]
fn snapshots_format_lists_checkpoints() {
    let (dir, path) = source_file("app.view.tree", "a\n\tb\n");
    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.current_dir(dir.path())
        .arg(&path)
        .arg("--format")
        .arg("snapshots");

    cmd.assert().success().stdout(
        "@0 #0 01000000000100\n\
         @2 #2 01000000000100\n\
         @5 #5 0200000000010000000100\n",
    );
}

#[test]
fn config_file_is_layered_over_defaults() {
    let (dir, path) = source_file("app.view.tree", "a\n\tb\n");
    let config = dir.path().join("custom.toml");
    std::fs::write(
        &config,
        "[scanner]\nsame_level = true\n\n[output]\nformat = \"structure\"\n",
    )
    .expect("write config");

    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.current_dir(dir.path())
        .arg(&path)
        .arg("--config")
        .arg(&config);
    cmd.assert().success().stdout(
        "SAME_LEVEL LINE_BREAK INDENT_OPEN LINE_BREAK LINE_BREAK INDENT_CLOSE\n",
    );
}

#[test]
fn local_config_is_picked_up_from_working_directory() {
    let (dir, path) = source_file("app.view.tree", "a b\n");
    std::fs::write(
        dir.path().join("viewtree.toml"),
        "[output]\nskip_trivia = true\n",
    )
    .expect("write config");

    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.current_dir(dir.path()).arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Identifier \"b\"").and(predicate::str::contains("Whitespace").not()));
}

#[test]
fn capacity_refusals_are_reported_as_warnings() {
    let (dir, path) = source_file("deep.view.tree", "a\n\tb\n\t\tc\n");
    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.current_dir(dir.path())
        .arg(&path)
        .arg("--set")
        .arg("scanner.max_depth=2");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("warning:").and(predicate::str::contains("Nesting too deep")));
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.current_dir(dir.path()).arg("nope.view.tree");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading"));
}

#[test]
fn malformed_override_fails() {
    let (dir, path) = source_file("app.view.tree", "a\n");
    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.current_dir(dir.path())
        .arg(&path)
        .arg("--set")
        .arg("scanner.same_level");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unknown_format_is_rejected() {
    let (dir, path) = source_file("app.view.tree", "a\n");
    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.current_dir(dir.path()).arg(&path).arg("--format").arg("xml");
    cmd.assert().failure();
}

#[test]
fn lists_formats() {
    let mut cmd = cargo_bin_cmd!("viewtree");
    cmd.arg("--list-formats");
    cmd.assert().success().stdout(
        predicate::str::contains("token-simple").and(predicate::str::contains("snapshots")),
    );
}
