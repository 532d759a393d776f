// src/routes/notification_routes.rs
use crate::models::ServiceError;
use crate::utils::{notification_storage, AppState};
use actix_web::{get, put, web, HttpResponse};
use log::{debug, info};

#[get("/notifications/user/{user_id}")]
async fn get_user_notifications(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = path.into_inner();
    let notifications = notification_storage::get_notifications_for_user(state.store(), &user_id)?;

    debug!("Found {} notifications for user: {}", notifications.len(), user_id);
    Ok(HttpResponse::Ok().json(notifications))
}

#[put("/notifications/{notification_id}/mark-read")]
async fn mark_notification_read(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let result = notification_storage::mark_read(state.store(), &path.into_inner())?;
    Ok(HttpResponse::Ok().json(result))
}

// Older clients use the shorter path
#[put("/notifications/{notification_id}/read")]
async fn mark_notification_read_legacy(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let result = notification_storage::mark_read(state.store(), &path.into_inner())?;
    Ok(HttpResponse::Ok().json(result))
}

#[put("/notifications/user/{user_id}/mark-all-read")]
async fn mark_all_notifications_read(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = path.into_inner();
    let result = notification_storage::mark_all_read(state.store(), &user_id)?;

    info!("✅ Marked {} notifications read for user: {}", result.modified_count, user_id);
    Ok(HttpResponse::Ok().json(result))
}

// Register all notification routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_user_notifications)
        .service(mark_all_notifications_read)
        .service(mark_notification_read)
        .service(mark_notification_read_legacy);
}
