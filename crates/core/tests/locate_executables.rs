use std::fs;
use std::path::Path;

use tempfile::tempdir;
use xbox_exe_core::config::PACKAGE_REPOSITORY_ROOT as BASE;
use xbox_exe_core::locate::{find_files, locate};
use xbox_exe_core::registry::MemoryHive;
use xbox_exe_core::GameCatalog;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
    fs::write(path, b"MZ").expect("write file");
}

fn catalog_for(installs: &[(&str, &Path)]) -> GameCatalog {
    let hive = installs.iter().fold(MemoryHive::new(), |hive, (id, root)| {
        hive.with_package(BASE, "Group", id, &root.to_string_lossy())
    });
    GameCatalog::discover(&hive, BASE).expect("discover")
}

#[test]
fn locate_records_substring_matches_recursively() {
    let dir = tempdir().expect("tempdir");
    let game = dir.path().join("Expedition33");
    touch(&game.join("Content/SandFall/Binaries/WinGDK/SandFall-WinGDK-Shipping.exe"));
    touch(&game.join("Content/SandFall-WinGDK-Shipping.exe.bak"));
    touch(&game.join("Content/gamelaunchhelper.exe"));

    let mut catalog = catalog_for(&[("Expedition33", &game)]);
    let added = locate(&mut catalog, "SandFall-WinGDK-Shipping.exe");

    assert_eq!(added, 2);
    let mut names: Vec<&str> =
        catalog.games()[0].executables.iter().map(|exe| exe.executable_name.as_str()).collect();
    names.sort();
    assert_eq!(names, ["SandFall-WinGDK-Shipping.exe", "SandFall-WinGDK-Shipping.exe.bak"]);
    assert!(catalog.games()[0].executables.iter().all(|exe| !exe.was_renamed && exe.full_path.is_file()));
}

#[test]
fn locate_match_is_case_sensitive() {
    let dir = tempdir().expect("tempdir");
    let game = dir.path().join("csgo");
    touch(&game.join("CSGO.EXE"));

    let mut catalog = catalog_for(&[("csgo", &game)]);
    assert_eq!(locate(&mut catalog, "csgo.exe"), 0);
    assert_eq!(catalog.executable_count(), 0);
}

#[test]
fn missing_or_non_directory_installs_are_skipped() {
    let dir = tempdir().expect("tempdir");
    let present = dir.path().join("present");
    touch(&present.join("game.exe"));
    let not_a_dir = dir.path().join("file-instead");
    fs::write(&not_a_dir, b"x").expect("write");
    let missing = dir.path().join("missing");

    let mut catalog =
        catalog_for(&[("Missing", &missing), ("NotDir", &not_a_dir), ("Present", &present)]);
    assert_eq!(locate(&mut catalog, "game.exe"), 1);
    assert_eq!(catalog.get("Present").expect("present").executables.len(), 1);
    assert!(catalog.get("Missing").expect("missing").executables.is_empty());
    assert!(catalog.get("NotDir").expect("not dir").executables.is_empty());
}

#[test]
fn repeated_locate_does_not_duplicate_records() {
    let dir = tempdir().expect("tempdir");
    let game = dir.path().join("g");
    touch(&game.join("bin/game.exe"));

    let mut catalog = catalog_for(&[("G", &game)]);
    assert_eq!(locate(&mut catalog, "game.exe"), 1);
    assert_eq!(locate(&mut catalog, "game"), 0);
    assert_eq!(catalog.executable_count(), 1);
}

#[test]
fn packages_sharing_an_install_directory_record_each_file_once() {
    let dir = tempdir().expect("tempdir");
    let shared = dir.path().join("shared");
    touch(&shared.join("bin/game.exe"));

    let mut catalog = catalog_for(&[("Retail", &shared), ("Trial", &shared)]);
    assert_eq!(locate(&mut catalog, "game.exe"), 1);
    assert_eq!(catalog.executable_count(), 1);
}

#[test]
fn find_files_reports_without_recording() {
    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("first");
    let second = dir.path().join("second");
    touch(&first.join("launcher.exe"));
    touch(&second.join("sub/launcher.exe"));
    touch(&second.join("readme.txt"));

    let catalog = catalog_for(&[("First", &first), ("Second", &second)]);
    let mut found = find_files(&catalog, "launcher");
    found.sort_by(|a, b| a.game_key.cmp(&b.game_key));

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].game_key, "First");
    assert_eq!(found[1].game_key, "Second");
    assert!(found.iter().all(|file| file.file_name == "launcher.exe"));
    assert_eq!(catalog.executable_count(), 0);

    assert!(find_files(&catalog, "nothing-like-this").is_empty());
}

#[cfg(unix)]
#[test]
fn unreadable_directory_does_not_abort_other_installs() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().expect("tempdir");
    let broken = dir.path().join("broken");
    let locked = broken.join("locked");
    touch(&locked.join("game.exe"));
    let healthy = dir.path().join("healthy");
    touch(&healthy.join("game.exe"));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");
    // Privileged users can still read the directory; the walk then simply succeeds.
    let locked_readable = fs::read_dir(&locked).is_ok();

    let mut catalog = catalog_for(&[("Broken", &broken), ("Healthy", &healthy)]);
    locate(&mut catalog, "game.exe");

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore chmod");

    assert_eq!(catalog.get("Healthy").expect("healthy").executables.len(), 1);
    let broken_found = catalog.get("Broken").expect("broken").executables.len();
    assert_eq!(broken_found, usize::from(locked_readable));
}
