// src/routes/mod.rs
use actix_web::{error, get, web, HttpResponse, Responder};
use log::warn;

use crate::models::ServiceError;

pub mod invitation_routes;
pub mod message_routes;
pub mod notification_routes;
pub mod task_routes;
pub mod team_routes;
pub mod user_routes;

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().body("server is running")
}

// Malformed bodies and query strings answer with the same JSON shape as other errors
fn json_error_handler(err: error::JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    warn!("Rejected JSON payload: {}", err);
    ServiceError::BadRequest(err.to_string()).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    warn!("Rejected query string: {}", err);
    ServiceError::BadRequest(err.to_string()).into()
}

// Register every route of the service
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(index);

    user_routes::init_routes(cfg);
    team_routes::init_routes(cfg);
    invitation_routes::init_routes(cfg);
    message_routes::init_routes(cfg);
    notification_routes::init_routes(cfg);
    task_routes::init_routes(cfg);
}
