//! Storage backends and cross-instance session sync.

mod common;

use std::fs;
use std::sync::Arc;

use common::sample_user;
use wordbook_sdk::{
    FileStorage, KeyValueStorage, MemoryStorage, SessionStore, StorageEvent, WordbookSdk,
};

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("k"), None);
    storage.set("k", "v").unwrap();
    assert_eq!(storage.get("k").as_deref(), Some("v"));
    storage.remove("k").unwrap();
    assert_eq!(storage.get("k"), None);
    // Removing an absent key is fine.
    storage.remove("k").unwrap();
    assert!(storage.reload().unwrap().is_empty());
}

#[test]
fn file_storage_persists_across_instances() {
    let tmp = tempfile::tempdir().unwrap();
    {
        let storage = FileStorage::open(Some(tmp.path().to_path_buf())).unwrap();
        storage.set("auth_token", "tok-1").unwrap();
        assert!(storage.path().exists());
    }
    let reopened = FileStorage::open(Some(tmp.path().to_path_buf())).unwrap();
    assert_eq!(reopened.get("auth_token").as_deref(), Some("tok-1"));
}

#[test]
fn file_storage_leaves_no_temp_file() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(Some(tmp.path().to_path_buf())).unwrap();
    storage.set("a", "1").unwrap();
    let names: Vec<String> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["storage.json".to_string()]);
}

#[test]
fn corrupt_file_starts_empty() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("storage.json"), "not json at all").unwrap();
    let storage = FileStorage::open(Some(tmp.path().to_path_buf())).unwrap();
    assert_eq!(storage.get("auth_token"), None);

    // The next write replaces the corrupt file.
    storage.set("auth_token", "tok").unwrap();
    let reopened = FileStorage::open(Some(tmp.path().to_path_buf())).unwrap();
    assert_eq!(reopened.get("auth_token").as_deref(), Some("tok"));
}

#[test]
fn reload_reports_changed_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let ours = FileStorage::open(Some(tmp.path().to_path_buf())).unwrap();
    ours.set("theme", "dark").unwrap();
    ours.set("auth_token", "tok-1").unwrap();

    let theirs = FileStorage::open(Some(tmp.path().to_path_buf())).unwrap();
    theirs.set("auth_token", "tok-2").unwrap();
    theirs.set("user_data", "{}").unwrap();

    let events = ours.reload().unwrap();
    assert_eq!(
        events,
        vec![
            StorageEvent::changed("auth_token"),
            StorageEvent::changed("user_data"),
        ]
    );
    assert_eq!(ours.get("auth_token").as_deref(), Some("tok-2"));
    assert!(ours.reload().unwrap().is_empty());
}

#[test]
fn reload_reports_wipe_as_cleared() {
    let tmp = tempfile::tempdir().unwrap();
    let ours = FileStorage::open(Some(tmp.path().to_path_buf())).unwrap();
    ours.set("auth_token", "tok-1").unwrap();

    fs::remove_file(ours.path()).unwrap();
    assert_eq!(ours.reload().unwrap(), vec![StorageEvent::cleared()]);
    assert_eq!(ours.get("auth_token"), None);
}

// ---------------------------------------------------------------------------
// SDK-level sync
// ---------------------------------------------------------------------------

#[test]
fn sdk_picks_up_session_written_by_another_process() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sdk = WordbookSdk::builder().data_dir(tmp.path()).build().unwrap();
    assert!(!sdk.session().is_authenticated());

    let other = SessionStore::new(Arc::new(
        FileStorage::open(Some(tmp.path().to_path_buf())).unwrap(),
    ));
    other.save(&sample_user()).unwrap();

    assert!(sdk.sync_storage().unwrap());
    assert_eq!(sdk.session().user().unwrap().username, "ada");

    other.clear().unwrap();
    assert!(sdk.sync_storage().unwrap());
    assert!(!sdk.session().is_authenticated());
}

#[test]
fn sdk_restores_session_on_build() {
    let tmp = tempfile::tempdir().unwrap();
    let store = SessionStore::new(Arc::new(
        FileStorage::open(Some(tmp.path().to_path_buf())).unwrap(),
    ));
    store.save(&sample_user()).unwrap();

    let sdk = WordbookSdk::builder().data_dir(tmp.path()).build().unwrap();
    assert!(sdk.session().is_authenticated());
    assert!(sdk.to_string().contains("session=user=ada"));
}

#[test]
fn unrelated_changes_do_not_resync() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sdk = WordbookSdk::builder().data_dir(tmp.path()).build().unwrap();

    let other = FileStorage::open(Some(tmp.path().to_path_buf())).unwrap();
    other.set("theme", "dark").unwrap();
    assert!(!sdk.sync_storage().unwrap());
}

#[test]
fn in_memory_sdk_never_resyncs() {
    let mut sdk = WordbookSdk::builder().in_memory().build().unwrap();
    assert!(!sdk.sync_storage().unwrap());
}
