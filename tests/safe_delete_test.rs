//! Protected paths must be refused before anything on disk is touched.

use expo_migrator::project::safe_delete_folder;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn home() -> PathBuf {
    dirs::home_dir().expect("home directory")
}

fn assert_refused(path: PathBuf) {
    let existed = path.exists();
    let err = safe_delete_folder(&path, false).unwrap_err();
    assert!(
        err.to_string().contains("Refusing to delete protected directory"),
        "unexpected error for {:?}: {}",
        path,
        err
    );
    assert_eq!(path.exists(), existed);
}

#[test]
fn refuses_filesystem_root() {
    assert_refused(PathBuf::from("/"));
}

#[test]
fn refuses_home_directory() {
    assert_refused(home());
}

#[test]
fn refuses_home_folders() {
    for sub in ["Desktop", "Documents", "Downloads"] {
        assert_refused(home().join(sub));
    }
}

#[test]
fn refuses_protected_path_given_indirectly() {
    // Resolves to the home directory
    assert_refused(home().join("Desktop").join(".."));
}

#[test]
fn deletes_ordinary_backup_folder() {
    let temp_dir = TempDir::new().unwrap();
    let backup = temp_dir.path().join("old_my-app");
    fs::create_dir_all(backup.join("src")).unwrap();
    fs::write(backup.join("src/App.tsx"), "app").unwrap();

    assert!(safe_delete_folder(&backup, false).unwrap());
    assert!(!backup.exists());
    assert!(temp_dir.path().exists());
}
