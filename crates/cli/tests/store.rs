use mailpilot_core::models::{
    ChatRole, EmailSource, FolderSource, ModelFile, SourceKind, TrainingPhase, TrainingUpdate,
};
use mailpilot_core::store::{Store, FOLDER_SOURCE_CAP};
use uuid::Uuid;

fn email(name: &str) -> EmailSource {
    EmailSource {
        id: Uuid::new_v4(),
        path: format!("/home/me/{}", name),
        kind: SourceKind::Directory,
        name: name.to_string(),
        size: 0,
    }
}

fn folder(name: &str) -> FolderSource {
    FolderSource {
        id: Uuid::new_v4(),
        path: format!("/data/{}", name),
        name: name.to_string(),
    }
}

fn model(name: &str) -> ModelFile {
    ModelFile {
        id: Uuid::new_v4(),
        path: format!("/models/{}", name),
        name: name.to_string(),
        size: 42,
    }
}

#[test]
fn folder_collection_never_exceeds_cap() {
    let store = Store::new();
    for i in 0..10 {
        store.add_folder_source(folder(&format!("folder-{}", i)));
    }
    let folders = store.folder_sources();
    assert_eq!(folders.len(), FOLDER_SOURCE_CAP);
    // The first three survive; later adds were ignored.
    let names: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["folder-0", "folder-1", "folder-2"]);
}

#[test]
fn remove_filters_by_id_and_ignores_unknown_ids() {
    let store = Store::new();
    let keep = email("keep");
    let drop = email("drop");
    store.add_email_source(keep.clone());
    store.add_email_source(drop.clone());

    store.remove_email_source(drop.id);
    let remaining = store.email_sources();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "keep");

    store.remove_email_source(Uuid::new_v4());
    assert_eq!(store.email_sources().len(), 1);

    let f = folder("docs");
    store.add_folder_source(f.clone());
    store.remove_folder_source(Uuid::new_v4());
    assert_eq!(store.folder_sources().len(), 1);
    store.remove_folder_source(f.id);
    assert!(store.folder_sources().is_empty());
}

#[test]
fn set_model_file_replaces_then_clears() {
    let store = Store::new();
    assert!(store.model_file().is_none());

    store.set_model_file(Some(model("first.gguf")));
    store.set_model_file(Some(model("second.gguf")));
    assert_eq!(store.model_file().unwrap().name, "second.gguf");

    store.set_model_file(None);
    assert!(store.model_file().is_none());
}

#[test]
fn training_update_merges_only_given_fields() {
    let store = Store::new();
    let initial = store.training_status();
    assert_eq!(initial.phase, TrainingPhase::Idle);
    assert_eq!(initial.progress, 0);

    store.update_training(TrainingUpdate {
        progress: Some(40),
        ..Default::default()
    });
    let status = store.training_status();
    assert_eq!(status.phase, TrainingPhase::Idle);
    assert_eq!(status.progress, 40);
    assert_eq!(status.message, initial.message);

    store.update_training(TrainingUpdate {
        phase: Some(TrainingPhase::Failed),
        message: Some("boom".to_string()),
        ..Default::default()
    });
    let status = store.training_status();
    assert_eq!(status.phase, TrainingPhase::Failed);
    assert_eq!(status.progress, 40);
    assert_eq!(status.message, "boom");
}

#[test]
fn chat_log_preserves_append_order_and_clears() {
    let store = Store::new();
    store.push_chat_message(ChatRole::User, "one");
    store.push_chat_message(ChatRole::Assistant, "two");
    store.push_chat_message(ChatRole::System, "three");

    let log = store.chat_messages();
    let contents: Vec<_> = log.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two", "three"]);
    assert_eq!(log[2].role, ChatRole::System);

    store.clear_chat_messages();
    assert!(store.chat_messages().is_empty());

    store.clear_chat_messages();
    assert!(store.chat_messages().is_empty());
}

#[test]
fn has_data_source_sees_either_collection() {
    let store = Store::new();
    assert!(!store.has_data_source());
    store.add_folder_source(folder("docs"));
    assert!(store.has_data_source());

    let store = Store::new();
    store.add_email_source(email("Mail"));
    assert!(store.has_data_source());
}
