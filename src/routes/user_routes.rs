// src/routes/user_routes.rs
use crate::models::{CreateUserRequest, ServiceError, UpdateRoleRequest, User};
use crate::services::membership_service;
use crate::utils::{user_storage, AppState};
use actix_web::{get, post, put, web, HttpResponse};
use log::{error, info};
use serde_json::json;

#[get("/users")]
async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let users = user_storage::list_users(state.store())?;
    info!("✅ Found {} users", users.len());
    Ok(HttpResponse::Ok().json(users))
}

// Called after every sign-in; a second call for the same email is a no-op
#[post("/users")]
async fn register_user(
    state: web::Data<AppState>,
    data: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = data.into_inner();
    info!("📝 Register request for email: {}", request.email);

    if !membership_service::is_valid_email(&request.email) {
        error!("❌ Invalid email: {}", request.email);
        return Err(ServiceError::BadRequest(format!("Invalid email: {}", request.email)));
    }

    let user = User::new(request);
    match user_storage::insert_user_if_absent(state.store(), &user)? {
        Some(inserted_id) => Ok(HttpResponse::Ok().json(json!({ "insertedId": inserted_id }))),
        None => {
            info!("User already exists: {}", user.email);
            Ok(HttpResponse::Ok().json(json!({
                "message": "User already exists",
                "insertedId": null
            })))
        }
    }
}

#[put("/users/{user_id}/role")]
async fn update_user_role(
    state: web::Data<AppState>,
    path: web::Path<String>,
    data: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = path.into_inner();
    info!("🔄 Setting role of user: {} to {}", user_id, data.role.as_str());

    let result = user_storage::set_role_by_id(state.store(), &user_id, data.role)?;
    Ok(HttpResponse::Ok().json(result))
}

#[put("/users/email/{email}/role")]
async fn update_user_role_by_email(
    state: web::Data<AppState>,
    path: web::Path<String>,
    data: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, ServiceError> {
    let email = path.into_inner();
    info!("🔄 Setting role of user: {} to {}", email, data.role.as_str());

    let result = user_storage::set_role_by_email(state.store(), &email, data.role)?;
    Ok(HttpResponse::Ok().json(result))
}

// Register all user routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(register_user)
        .service(update_user_role_by_email)
        .service(update_user_role);
}
