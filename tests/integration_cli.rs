// Non-interactive paths of the binary: these exit before the TUI starts.

use assert_cmd::Command;

fn keycadence() -> Command {
    let mut cmd = Command::cargo_bin("keycadence").unwrap();
    // keep preferences and logs out of the real home directory
    let home = tempfile::tempdir().unwrap().into_path();
    cmd.env("HOME", &home).env("XDG_CONFIG_HOME", home.join("config"));
    cmd
}

#[test]
fn list_packs_prints_every_pack() {
    let output = keycadence().arg("--list-packs").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 10);
    assert!(stdout.contains("top-200"));
    assert!(stdout.contains("special-chars"));
}

#[test]
fn list_packs_filters_by_category() {
    let output = keycadence()
        .args(["--list-packs", "code"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let ids: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(ids, vec!["javascript", "python", "react-typescript"]);
}

#[test]
fn unknown_category_is_rejected() {
    keycadence()
        .args(["--list-packs", "poetry"])
        .assert()
        .failure();
}

#[test]
fn invalid_session_length_is_rejected() {
    keycadence().args(["-t", "45"]).assert().failure();
}

#[test]
fn unknown_pack_is_rejected() {
    let output = keycadence().args(["--pack", "nope"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown word pack 'nope'"));
}

#[test]
fn language_without_texts_fails_before_tui() {
    let output = keycadence().args(["-l", "ja"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no texts for language"));
}

#[test]
fn non_tty_stdin_is_rejected() {
    let output = keycadence().args(["-p", "hi"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("stdin must be a tty"));
}
