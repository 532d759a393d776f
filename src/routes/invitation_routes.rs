// src/routes/invitation_routes.rs
use crate::models::{CreateInvitationRequest, ServiceError};
use crate::services::membership_service;
use crate::utils::{invitation_storage, AppState};
use actix_web::{get, post, put, web, HttpResponse};
use log::info;

// Create a new team invitation
#[post("/invitations")]
async fn create_invitation(
    state: web::Data<AppState>,
    data: web::Json<CreateInvitationRequest>,
) -> Result<HttpResponse, ServiceError> {
    info!(
        "📧 Creating invitation to team: {} for email: {}",
        data.team_id, data.invitee_email
    );

    let invitation = membership_service::create_invitation(state.store(), data.into_inner())?;
    Ok(HttpResponse::Ok().json(invitation))
}

// Pending invitations for an invitee; drives the badge count
#[get("/invitations/user/{email}")]
async fn get_user_invitations(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let email = path.into_inner();
    info!("📋 Fetching invitations for: {}", email);

    let invitations = invitation_storage::get_pending_invitations_for_email(state.store(), &email)?;

    info!("✅ Found {} pending invitations", invitations.len());
    Ok(HttpResponse::Ok().json(invitations))
}

#[put("/invitations/{invitation_id}/accept")]
async fn accept_invitation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let response = membership_service::accept_invitation(state.store(), &path.into_inner())?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/invitations/{invitation_id}/decline")]
async fn decline_invitation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let response = membership_service::decline_invitation(state.store(), &path.into_inner())?;
    Ok(HttpResponse::Ok().json(response))
}

// Register all invitation routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_invitation)
        .service(get_user_invitations)
        .service(accept_invitation)
        .service(decline_invitation);
}
