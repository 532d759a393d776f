use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use serde_json::Value;

use super::support::{count, test_app};
use crate::models::{Notification, NotificationType};
use crate::utils::document_store::Filter;
use crate::utils::memory_store::MemoryStore;
use crate::utils::notification_storage;

fn notify(store: &MemoryStore, recipient: &str, message: &str, minutes_ago: i64) -> Notification {
    let notification = Notification {
        id: uuid::Uuid::new_v4().to_string(),
        recipient_id: recipient.to_string(),
        kind: NotificationType::InvitationAccepted,
        message: message.to_string(),
        team_name: "T1".to_string(),
        read: false,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    };
    notification_storage::save_notification(store, &notification).unwrap();
    notification
}

#[actix_rt::test]
async fn notifications_are_listed_newest_first() {
    let store = Arc::new(MemoryStore::new());
    notify(&store, "alice", "oldest", 30);
    notify(&store, "alice", "newest", 1);
    notify(&store, "alice", "middle", 10);
    notify(&store, "bob", "not yours", 0);
    let app = test_app!(store.clone());

    let request = test::TestRequest::get().uri("/notifications/user/alice").to_request();
    let notifications: Vec<Value> = test::call_and_read_body_json(&app, request).await;

    let messages: Vec<&str> = notifications
        .iter()
        .map(|n| n["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["newest", "middle", "oldest"]);
}

#[actix_rt::test]
async fn both_mark_read_paths_flag_one_notification() {
    let store = Arc::new(MemoryStore::new());
    let first = notify(&store, "alice", "first", 2);
    let second = notify(&store, "alice", "second", 1);
    let untouched = notify(&store, "alice", "third", 0);
    let app = test_app!(store.clone());

    for uri in [
        format!("/notifications/{}/mark-read", first.id),
        format!("/notifications/{}/read", second.id),
    ] {
        let request = test::TestRequest::put().uri(&uri).to_request();
        let result: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(result["matchedCount"], 1, "{}", uri);
        assert_eq!(result["modifiedCount"], 1, "{}", uri);
    }

    let stored = notification_storage::get_notifications_for_user(&*store, "alice").unwrap();
    for notification in stored {
        assert_eq!(notification.read, notification.id != untouched.id);
    }
}

#[actix_rt::test]
async fn marking_unknown_notification_matches_nothing() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app!(store.clone());

    let request = test::TestRequest::put().uri("/notifications/missing/mark-read").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let result: Value = test::read_body_json(response).await;
    assert_eq!(result["matchedCount"], 0);
}

#[actix_rt::test]
async fn mark_all_read_only_touches_that_user() {
    let store = Arc::new(MemoryStore::new());
    notify(&store, "alice", "one", 3);
    notify(&store, "alice", "two", 2);
    let already_read = notify(&store, "alice", "three", 1);
    notification_storage::mark_read(&*store, &already_read.id).unwrap();
    notify(&store, "bob", "bob's", 0);
    let app = test_app!(store.clone());

    let request = test::TestRequest::put()
        .uri("/notifications/user/alice/mark-all-read")
        .to_request();
    let result: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(result["modifiedCount"], 2);

    let unread = |recipient: &str| {
        count(
            &*store,
            Notification::COLLECTION,
            Filter::new().eq("recipientId", recipient).eq("read", false),
        )
    };
    assert_eq!(unread("alice"), 0);
    assert_eq!(unread("bob"), 1);
}
