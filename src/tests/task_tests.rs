use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use super::support::{count, test_app};
use crate::models::Task;
use crate::utils::document_store::Filter;
use crate::utils::memory_store::MemoryStore;

#[actix_rt::test]
async fn task_lifecycle() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app!(store.clone());

    let request = test::TestRequest::post()
        .uri("/tasks")
        .set_json(&json!({
            "id": "client-chosen",
            "title": "Write report",
            "status": "todo",
            "assignedTo": "bob",
            "project": "Apollo"
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, request).await;
    let task_id = created["id"].as_str().unwrap().to_string();
    assert_ne!(task_id, "client-chosen");
    assert_eq!(created["title"], "Write report");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let request = test::TestRequest::put()
        .uri(&format!("/tasks/{}", task_id))
        .set_json(&json!({ "status": "done", "createdAt": "1970-01-01T00:00:00Z" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(updated["status"], "done");
    assert_eq!(updated["title"], "Write report");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let request = test::TestRequest::get().uri(&format!("/tasks/{}", task_id)).to_request();
    let fetched: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(fetched["status"], "done");

    let request = test::TestRequest::delete().uri(&format!("/tasks/{}", task_id)).to_request();
    let result: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(result["deletedCount"], 1);
    assert_eq!(count(&*store, Task::COLLECTION, Filter::new()), 0);

    let request = test::TestRequest::get().uri(&format!("/tasks/{}", task_id)).to_request();
    assert_eq!(test::call_service(&app, request).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn tasks_are_filtered_by_query() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app!(store.clone());

    for (title, status, assignee) in [
        ("a", "todo", "bob"),
        ("b", "done", "bob"),
        ("c", "todo", "carol"),
    ] {
        let request = test::TestRequest::post()
            .uri("/tasks")
            .set_json(&json!({ "title": title, "status": status, "assignedTo": assignee }))
            .to_request();
        assert_eq!(test::call_service(&app, request).await.status(), StatusCode::OK);
    }

    let request = test::TestRequest::get().uri("/tasks?status=todo&assignedTo=bob").to_request();
    let tasks: Vec<Value> = test::call_and_read_body_json(&app, request).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "a");

    let request = test::TestRequest::get().uri("/tasks?status=todo").to_request();
    let tasks: Vec<Value> = test::call_and_read_body_json(&app, request).await;
    assert_eq!(tasks.len(), 2);

    let request = test::TestRequest::get().uri("/tasks").to_request();
    let tasks: Vec<Value> = test::call_and_read_body_json(&app, request).await;
    assert_eq!(tasks.len(), 3);
}

#[actix_rt::test]
async fn missing_tasks_are_not_found() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app!(store.clone());

    let request = test::TestRequest::put()
        .uri("/tasks/missing")
        .set_json(&json!({ "status": "done" }))
        .to_request();
    assert_eq!(test::call_service(&app, request).await.status(), StatusCode::NOT_FOUND);

    let request = test::TestRequest::delete().uri("/tasks/missing").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Task not found");
}
