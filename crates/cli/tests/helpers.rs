use std::fs;
use std::path::Path;

use tempfile::tempdir;
use xbox_exe::canonicalize_or_current;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    let result =
        canonicalize_or_current(Path::new(".")).expect("canonicalize").canonicalize().expect("canon");
    let expected = tmp.path().canonicalize().expect("canon tmp");
    assert_eq!(result, expected);

    std::env::set_current_dir(original).expect("restore cwd");
}

#[test]
fn canonicalize_or_current_resolves_existing_and_missing_paths() {
    let tmp = tempdir().expect("tempdir");
    let existing = tmp.path().join("xboxGames.json");
    fs::write(&existing, "{}").expect("write");

    let resolved = canonicalize_or_current(&existing).expect("canonicalize existing");
    assert_eq!(resolved, existing.canonicalize().expect("canonicalize file"));

    // Absolute paths that do not exist yet are returned as given.
    let missing = tmp.path().join("not-yet.json");
    assert_eq!(canonicalize_or_current(&missing).expect("canonicalize missing"), missing);
}
