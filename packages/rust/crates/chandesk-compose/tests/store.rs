#![allow(missing_docs)]

use chandesk_compose::{
    AuthSession, DeskState, DeskStore, Draft, Hashtag, JsonFileStore, MemoryStore, StoreError,
    TelegramId,
};

fn sample_state() -> DeskState {
    let mut state = DeskState {
        draft: Draft {
            title: "Title".to_string(),
            content: "<b>body</b>".to_string(),
        },
        ..DeskState::default()
    };
    state.hashtags.add(Hashtag::parse("news").expect("tag"));
    state.session = Some(AuthSession {
        token: Some("access".to_string()),
        refresh_token: Some("refresh".to_string()),
        telegram_id: Some(TelegramId::Numeric(7)),
        ..AuthSession::default()
    });
    state
}

#[test]
fn missing_file_loads_default_state() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(temp.path().join("absent.json"));
    assert_eq!(store.load().expect("load"), DeskState::default());
}

#[test]
fn save_creates_parent_dirs_and_round_trips() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("nested").join("state").join("desk.json");
    let store = JsonFileStore::new(&path);

    let state = sample_state();
    store.save(&state).expect("save");
    assert!(path.is_file());
    assert_eq!(store.load().expect("load"), state);

    let leftovers: Vec<_> = std::fs::read_dir(path.parent().expect("parent"))
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn empty_file_is_default_and_garbage_is_an_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("desk.json");

    std::fs::write(&path, "  \n").expect("write");
    let store = JsonFileStore::new(&path);
    assert_eq!(store.load().expect("load"), DeskState::default());

    std::fs::write(&path, "{not json").expect("write");
    assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
}

#[test]
fn session_keeps_unknown_fields() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("desk.json");
    std::fs::write(
        &path,
        r#"{"session":{"token":"t","refreshToken":"r","department":"it"}}"#,
    )
    .expect("write");

    let state = JsonFileStore::new(&path).load().expect("load");
    let session = state.session.expect("session");
    assert_eq!(session.bearer_token(), Some("t"));
    assert_eq!(session.refresh(), Some("r"));
    assert_eq!(session.extra["department"], "it");
    assert!(state.draft.is_empty());
}

#[test]
fn update_applies_change_and_persists() {
    let store = MemoryStore::default();
    let saved = store
        .update(&mut |state| state.draft.title = "Draft".to_string())
        .expect("update");
    assert_eq!(saved.draft.title, "Draft");
    assert_eq!(store.load().expect("load").draft.title, "Draft");
    assert_eq!(store.backend_name(), "memory");
}

#[test]
fn memory_store_starts_from_seed() {
    let store = MemoryStore::with_state(sample_state());
    let mut state = store.load().expect("load");
    state.draft.clear();
    state.session = None;
    store.save(&state).expect("save");

    let reloaded = store.load().expect("reload");
    assert!(reloaded.draft.is_empty());
    assert!(reloaded.session.is_none());
    assert_eq!(reloaded.hashtags.len(), 1);
}

#[test]
fn failed_save_leaves_no_temp_files() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("desk.json");
    std::fs::create_dir(&path).expect("occupy target with a directory");
    let store = JsonFileStore::new(&path);

    assert!(store.save(&sample_state()).is_err());
    let names: Vec<String> = std::fs::read_dir(temp.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["desk.json".to_string()]);
}
