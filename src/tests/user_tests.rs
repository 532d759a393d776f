use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use super::support::{count, test_app};
use crate::models::{User, UserRole};
use crate::utils::document_store::Filter;
use crate::utils::memory_store::MemoryStore;
use crate::utils::user_storage;

#[actix_rt::test]
async fn registering_twice_keeps_one_user() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app!(store.clone());
    let body = json!({ "email": "alice@x.com", "name": "Alice" });

    let request = test::TestRequest::post().uri("/users").set_json(&body).to_request();
    let first: Value = test::call_and_read_body_json(&app, request).await;
    assert!(first["insertedId"].is_string());

    let request = test::TestRequest::post().uri("/users").set_json(&body).to_request();
    let second: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(second["message"], "User already exists");
    assert!(second["insertedId"].is_null());

    assert_eq!(count(&*store, User::COLLECTION, Filter::new()), 1);

    let request = test::TestRequest::get().uri("/users").to_request();
    let users: Vec<Value> = test::call_and_read_body_json(&app, request).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["role"], "member");
    assert_eq!(users[0]["id"], first["insertedId"]);
}

#[actix_rt::test]
async fn invalid_email_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app!(store.clone());

    let request = test::TestRequest::post()
        .uri("/users")
        .set_json(&json!({ "email": "nope", "name": "Nobody" }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count(&*store, User::COLLECTION, Filter::new()), 0);
}

#[actix_rt::test]
async fn role_can_be_set_by_id_or_email() {
    let store = Arc::new(MemoryStore::new());
    let alice = User::new(crate::models::CreateUserRequest {
        email: "alice@x.com".to_string(),
        name: "Alice".to_string(),
        role: None,
        photo_url: None,
    });
    user_storage::insert_user_if_absent(&*store, &alice).unwrap();
    let app = test_app!(store.clone());

    let request = test::TestRequest::put()
        .uri(&format!("/users/{}/role", alice.id))
        .set_json(&json!({ "role": "leader" }))
        .to_request();
    let result: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(result["modifiedCount"], 1);
    let stored = user_storage::find_user_by_id(&*store, &alice.id).unwrap().unwrap();
    assert_eq!(stored.role, UserRole::Leader);

    let request = test::TestRequest::put()
        .uri("/users/email/alice@x.com/role")
        .set_json(&json!({ "role": "member" }))
        .to_request();
    let result: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(result["matchedCount"], 1);
    let stored = user_storage::find_user_by_id(&*store, &alice.id).unwrap().unwrap();
    assert_eq!(stored.role, UserRole::Member);
}

#[actix_rt::test]
async fn unknown_role_is_a_bad_request() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app!(store.clone());

    let request = test::TestRequest::put()
        .uri("/users/someone/role")
        .set_json(&json!({ "role": "admin" }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert!(body["message"].is_string());
}

#[actix_rt::test]
async fn index_reports_liveness() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app!(store.clone());

    let request = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, request).await;

    assert_eq!(body, actix_web::web::Bytes::from_static(b"server is running"));
}

#[actix_rt::test]
async fn emails_differing_only_in_case_are_one_user() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app!(store.clone());

    for email in ["bob@x.com", "Bob@X.com ", "BOB@x.COM"] {
        let request = test::TestRequest::post()
            .uri("/users")
            .set_json(&json!({ "email": email, "name": "Bob" }))
            .to_request();
        assert_eq!(test::call_service(&app, request).await.status(), StatusCode::OK);
    }

    let users = user_storage::list_users(&*store).unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "bob@x.com");

    let request = test::TestRequest::put()
        .uri("/users/email/Bob@X.com/role")
        .set_json(&json!({ "role": "leader" }))
        .to_request();
    let result: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(result["matchedCount"], 1);
}
