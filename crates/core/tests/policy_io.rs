use std::fs;

use serde_json::{json, Value};
use tempfile::tempdir;
use xbox_exe_core::policy::{
    create_default, load, load_applied, load_local_database, save, write_document, PolicyError,
};
use xbox_exe_core::BinaryInfo;

#[test]
fn items_without_exe_name_are_dropped() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("xboxGames.json");
    let body = json!({
        "exes": [
            { "name": "first", "exeName": "first.exe" },
            { "name": "no exe" },
            { "name": "empty exe", "exeName": "" },
            { "name": "wrong type", "exeName": 42 },
            { "name": "last", "exeName": "last.exe", "rename": true, "newExeName": "final.exe" }
        ]
    });
    fs::write(&path, body.to_string()).expect("write");

    let binaries = load(&path).expect("load");
    assert_eq!(binaries.len(), 2);
    assert_eq!(binaries[0], BinaryInfo::new("first", "first.exe"));
    assert_eq!(binaries[1], BinaryInfo::new("last", "last.exe").renamed_to("final.exe"));
}

#[test]
fn new_exe_name_is_only_read_when_rename_is_set() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("policy.json");
    let body = json!({
        "exes": [
            { "name": "csgo", "exeName": "csgo.exe", "rename": false, "newExeName": "cs2.exe" },
            { "name": "odd", "exeName": "odd.exe", "rename": "yes", "newExeName": "even.exe" }
        ]
    });
    fs::write(&path, body.to_string()).expect("write");

    let binaries = load(&path).expect("load");
    assert!(!binaries[0].rename);
    assert_eq!(binaries[0].new_exe_name, "");
    // A non-boolean `rename` counts as false.
    assert!(!binaries[1].rename);
    assert_eq!(binaries[1].new_exe_name, "");
}

#[test]
fn renamed_flag_is_ignored_by_load_but_honoured_by_load_applied() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("policy.json");
    let body = json!({
        "exes": [
            { "name": "g", "exeName": "a.exe", "rename": true, "newExeName": "b.exe", "renamed": true }
        ]
    });
    fs::write(&path, body.to_string()).expect("write");

    assert!(!load(&path).expect("load")[0].was_renamed);
    assert!(load_applied(&path).expect("load applied")[0].was_renamed);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, PolicyError::Io { .. }), "unexpected error: {err}");
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("policy.json");
    fs::write(&path, "{ \"exes\": [ ").expect("write");
    let err = load(&path).unwrap_err();
    assert!(matches!(err, PolicyError::Parse { .. }), "unexpected error: {err}");
}

#[test]
fn document_without_exes_array_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("policy.json");
    for body in [json!({}), json!({ "exes": { "name": "x" } }), json!([1, 2])] {
        fs::write(&path, body.to_string()).expect("write");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, PolicyError::MissingExes { .. }), "unexpected error: {err}");
        assert!(err.to_string().contains("missing 'exes' array"));
    }
}

#[test]
fn default_document_has_two_loadable_entries() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("xboxGames.json");
    create_default(&path).expect("create default");

    let raw: Value = serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    let exes = raw["exes"].as_array().expect("exes array");
    assert_eq!(exes.len(), 2);
    assert_eq!(exes[0]["exeName"], "csgo.exe");
    assert_eq!(exes[0]["newExeName"], "cs2.exe");
    assert_eq!(exes[1]["exeName"], "SandFall-WinGDK-Shipping.exe");
    assert!(exes.iter().all(|item| item["rename"] == false && item.get("renamed").is_none()));

    let binaries = load(&path).expect("load default");
    let names: Vec<&str> = binaries.iter().map(|b| b.exe_name.as_str()).collect();
    assert_eq!(names, ["csgo.exe", "SandFall-WinGDK-Shipping.exe"]);
}

#[test]
fn default_document_is_indented_with_four_spaces() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("xboxGames.json");
    create_default(&path).expect("create default");
    let body = fs::read_to_string(&path).expect("read");
    assert!(body.starts_with("{\n    \"exes\": [\n        {\n            \"name\""), "body: {body}");
}

#[test]
fn create_default_fails_when_directory_is_missing() {
    let dir = tempdir().expect("tempdir");
    let err = create_default(&dir.path().join("no-such-dir").join("policy.json")).unwrap_err();
    assert!(matches!(err, PolicyError::Io { .. }));
}

#[test]
fn save_without_renames_leaves_file_byte_identical() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("policy.json");
    let original = "{\"exes\":[{\"name\":\"csgo\",\"exeName\":\"csgo.exe\",\"rename\":false}]}  \n";
    fs::write(&path, original).expect("write");

    let binaries = load(&path).expect("load");
    assert!(!save(&path, &binaries).expect("save"));
    assert_eq!(fs::read_to_string(&path).expect("read"), original);
}

#[test]
fn save_after_rename_records_outcome() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("policy.json");
    let mut renamed =
        BinaryInfo::new("Clair Obscur", "SandFall-WinGDK-Shipping.exe").renamed_to("SandFall-Win64-Shipping.exe");
    renamed.was_renamed = true;
    let binaries = vec![BinaryInfo::new("csgo", "csgo.exe"), renamed];

    assert!(save(&path, &binaries).expect("save"));

    let raw: Value = serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(
        raw["exes"][1],
        json!({
            "name": "Clair Obscur",
            "exeName": "SandFall-WinGDK-Shipping.exe",
            "rename": true,
            "newExeName": "SandFall-Win64-Shipping.exe",
            "renamed": true
        })
    );
    assert_eq!(raw["exes"][0]["renamed"], false);

    // What was written reads back as the same policy, minus the outcome.
    let reloaded = load(&path).expect("reload");
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.iter().all(|b| !b.was_renamed));
    assert_eq!(load_applied(&path).expect("reload applied"), binaries);
}

#[test]
fn write_document_overwrites_even_without_renames() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("policy.json");
    fs::write(&path, "stale").expect("write");
    write_document(&path, &[BinaryInfo::new("g", "g.exe")]).expect("write document");
    assert_eq!(load(&path).expect("load"), vec![BinaryInfo::new("g", "g.exe")]);
}

#[test]
fn local_database_has_two_entries_without_renames() {
    let binaries = load_local_database();
    assert_eq!(binaries.len(), 2);
    assert!(binaries.iter().all(|b| !b.exe_name.is_empty() && !b.rename && !b.was_renamed));
}
