// src/routes/task_routes.rs
use crate::models::{ServiceError, Task, TaskQuery};
use crate::utils::{task_storage, AppState};
use actix_web::{delete, get, post, put, web, HttpResponse};
use log::{error, info};
use serde_json::{Map, Value};

#[get("/tasks")]
async fn list_tasks(
    state: web::Data<AppState>,
    query: web::Query<TaskQuery>,
) -> Result<HttpResponse, ServiceError> {
    let tasks = task_storage::list_tasks(state.store(), &query)?;
    info!("📋 Found {} tasks", tasks.len());
    Ok(HttpResponse::Ok().json(tasks))
}

#[get("/tasks/{task_id}")]
async fn get_task(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let task_id = path.into_inner();

    match task_storage::find_task_by_id(state.store(), &task_id)? {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => {
            error!("❌ Task not found: {}", task_id);
            Err(ServiceError::NotFound("Task not found".to_string()))
        }
    }
}

#[post("/tasks")]
async fn create_task(
    state: web::Data<AppState>,
    data: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ServiceError> {
    let task = Task::new(data.into_inner());
    task_storage::save_task(state.store(), &task)?;

    info!("✅ Task created: {}", task.id);
    Ok(HttpResponse::Ok().json(task))
}

#[put("/tasks/{task_id}")]
async fn update_task(
    state: web::Data<AppState>,
    path: web::Path<String>,
    data: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ServiceError> {
    let task_id = path.into_inner();

    match task_storage::update_task(state.store(), &task_id, data.into_inner())? {
        Some(task) => {
            info!("✅ Task updated: {}", task_id);
            Ok(HttpResponse::Ok().json(task))
        }
        None => {
            error!("❌ Task not found: {}", task_id);
            Err(ServiceError::NotFound("Task not found".to_string()))
        }
    }
}

#[delete("/tasks/{task_id}")]
async fn delete_task(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let task_id = path.into_inner();

    let result = task_storage::delete_task(state.store(), &task_id)?;
    if result.deleted_count == 0 {
        error!("❌ Task not found: {}", task_id);
        return Err(ServiceError::NotFound("Task not found".to_string()));
    }

    info!("✅ Task deleted: {}", task_id);
    Ok(HttpResponse::Ok().json(result))
}

// Register all task routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_tasks)
        .service(get_task)
        .service(create_task)
        .service(update_task)
        .service(delete_task);
}
