// src/routes/message_routes.rs
use crate::models::{CallerIdentity, EditMessageRequest, Message, SendMessageRequest, ServiceError};
use crate::services::membership_service;
use crate::utils::{message_storage, AppState};
use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use log::{error, info};

#[post("/teams/{team_id}/messages")]
async fn send_message(
    state: web::Data<AppState>,
    path: web::Path<String>,
    data: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    let request = data.into_inner();
    info!("💬 Message to team: {} from: {}", team_id, request.sender_id);

    if request.message.trim().is_empty() {
        return Err(ServiceError::BadRequest("Message cannot be empty".to_string()));
    }

    membership_service::authorize_team_participant(state.store(), &team_id, &request.sender_id)?;

    let message = Message::new(&team_id, request);
    message_storage::save_message(state.store(), &message)?;

    Ok(HttpResponse::Ok().json(message))
}

#[get("/teams/{team_id}/messages")]
async fn get_team_messages(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<CallerIdentity>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();

    membership_service::authorize_team_participant(state.store(), &team_id, &query.user_id)?;

    let messages = message_storage::get_team_messages(state.store(), &team_id)?;
    Ok(HttpResponse::Ok().json(messages))
}

#[put("/messages/{message_id}")]
async fn edit_message(
    state: web::Data<AppState>,
    path: web::Path<String>,
    data: web::Json<EditMessageRequest>,
) -> Result<HttpResponse, ServiceError> {
    let message_id = path.into_inner();
    info!("✏️ Editing message: {} by: {}", message_id, data.user_id);

    let new_text = data.new_message.trim();
    if new_text.is_empty() {
        return Err(ServiceError::BadRequest("Message cannot be empty".to_string()));
    }

    membership_service::authorize_message_sender(state.store(), &message_id, &data.user_id)?;

    let result = message_storage::edit_message(state.store(), &message_id, new_text, Utc::now())?;
    Ok(HttpResponse::Ok().json(result))
}

#[delete("/messages/{message_id}")]
async fn delete_message(
    state: web::Data<AppState>,
    path: web::Path<String>,
    data: web::Json<CallerIdentity>,
) -> Result<HttpResponse, ServiceError> {
    let message_id = path.into_inner();
    info!("🗑️ Deleting message: {} by: {}", message_id, data.user_id);

    membership_service::authorize_message_sender(state.store(), &message_id, &data.user_id)?;

    let result = message_storage::delete_message(state.store(), &message_id)?;
    if result.deleted_count == 0 {
        error!("❌ Message vanished before delete: {}", message_id);
        return Err(ServiceError::NotFound("Message not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(result))
}

// Register all message routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(send_message)
        .service(get_team_messages)
        .service(edit_message)
        .service(delete_message);
}
