// src/routes/team_routes.rs
use crate::models::{CreateTeamRequest, ServiceError, UpdateTeamRequest};
use crate::services::membership_service;
use crate::utils::{team_storage, AppState};
use actix_web::{delete, get, post, put, web, HttpResponse};
use log::{error, info};

// Every team; the client filters to the ones the user belongs to
#[get("/teams")]
async fn list_teams(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let teams = team_storage::list_teams(state.store())?;
    info!("📋 Found {} teams", teams.len());
    Ok(HttpResponse::Ok().json(teams))
}

#[get("/teams/{team_id}")]
async fn get_team(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();

    match team_storage::find_team_by_id(state.store(), &team_id)? {
        Some(team) => Ok(HttpResponse::Ok().json(team)),
        None => {
            error!("❌ Team not found: {}", team_id);
            Err(ServiceError::NotFound("Team not found".to_string()))
        }
    }
}

#[post("/teams")]
async fn create_team(
    state: web::Data<AppState>,
    data: web::Json<CreateTeamRequest>,
) -> Result<HttpResponse, ServiceError> {
    info!("📝 Creating new team: {} led by: {}", data.name, data.leader);

    let team = membership_service::create_team(state.store(), data.into_inner())?;
    Ok(HttpResponse::Ok().json(team))
}

#[put("/teams/{team_id}")]
async fn update_team(
    state: web::Data<AppState>,
    path: web::Path<String>,
    data: web::Json<UpdateTeamRequest>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    info!("🔄 Updating team: {}", team_id);

    if matches!(&data.name, Some(name) if name.trim().is_empty()) {
        return Err(ServiceError::BadRequest("Team name cannot be empty".to_string()));
    }

    let result = team_storage::update_team(state.store(), &team_id, &data)?;
    if result.matched_count == 0 {
        error!("❌ Team not found: {}", team_id);
        return Err(ServiceError::NotFound("Team not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(result))
}

#[delete("/teams/{team_id}")]
async fn delete_team(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    let outcome = membership_service::delete_team(state.store(), &team_id)?;
    Ok(HttpResponse::Ok().json(outcome))
}

// Register all team routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_teams)
        .service(get_team)
        .service(create_team)
        .service(update_team)
        .service(delete_team);
}
