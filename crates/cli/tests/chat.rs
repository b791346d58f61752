use mailpilot_core::chat::{respond, ChatError, ChatService};
use mailpilot_core::clock::InstantClock;
use mailpilot_core::config::AppConfig;
use mailpilot_core::models::{ChatRole, TrainingPhase, TrainingUpdate};
use mailpilot_core::store::Store;
use providers::canned::{default_rules, select_reply, CannedProvider, DEFAULT_REPLY};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn responder_applies_rules_in_order() {
    let rules = default_rules();

    let greeting = &rules[2].reply;
    assert_eq!(select_reply(&rules, DEFAULT_REPLY, "Hello there"), greeting);

    let found = &rules[0].reply;
    assert_eq!(
        select_reply(&rules, DEFAULT_REPLY, "please find my email from March"),
        found
    );

    let summary = &rules[1].reply;
    assert_eq!(
        select_reply(&rules, DEFAULT_REPLY, "give me a data summary"),
        summary
    );

    let searched = &rules[3].reply;
    assert_eq!(
        select_reply(&rules, DEFAULT_REPLY, "search my documents please"),
        searched
    );

    assert_eq!(select_reply(&rules, DEFAULT_REPLY, "xyz"), DEFAULT_REPLY);
}

#[test]
fn email_find_rule_beats_the_search_rule() {
    let rules = default_rules();
    // "find" satisfies both rule 1 and rule 4; rule 1 must win.
    assert_eq!(
        select_reply(&rules, DEFAULT_REPLY, "search and find that email"),
        &rules[0].reply
    );
}

#[test]
fn responder_normalizes_case() {
    let rules = default_rules();
    assert_eq!(
        select_reply(&rules, DEFAULT_REPLY, "HELLO THERE"),
        &rules[2].reply
    );
}

fn service(store: &Store) -> ChatService {
    ChatService::new(
        store.clone(),
        Arc::new(CannedProvider::default()),
        Arc::new(InstantClock),
        Duration::from_millis(1),
    )
}

#[tokio::test]
async fn send_is_gated_until_training_completes() {
    let store = Store::new();
    let chat = service(&store);

    assert!(matches!(chat.send("hi"), Err(ChatError::ModelNotReady)));
    assert!(matches!(chat.send("   "), Err(ChatError::EmptyMessage)));
    assert!(store.chat_messages().is_empty());

    store.update_training(TrainingUpdate {
        phase: Some(TrainingPhase::Training),
        ..Default::default()
    });
    assert!(matches!(chat.send("hi"), Err(ChatError::ModelNotReady)));
}

#[tokio::test]
async fn deferred_reply_appends_assistant_message() {
    let store = Store::new();
    store.update_training(TrainingUpdate {
        phase: Some(TrainingPhase::Completed),
        ..Default::default()
    });

    let chat = service(&store);
    chat.send("Hello there").unwrap().await.unwrap();

    let log = store.chat_messages();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].role, ChatRole::User);
    assert_eq!(log[0].content, "Hello there");
    assert_eq!(log[1].role, ChatRole::Assistant);
    assert_eq!(log[1].content, default_rules()[2].reply);

    chat.clear();
    assert!(store.chat_messages().is_empty());
}

#[tokio::test]
async fn respond_uses_the_preferred_provider() {
    let registry = mailpilot_core::app::build_registry(&AppConfig::default());
    let reply = respond(&registry, "give me a data summary").await.unwrap();
    assert_eq!(reply, default_rules()[1].reply);
}
