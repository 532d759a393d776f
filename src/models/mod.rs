// src/models/mod.rs
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use log::error;
use serde_json::json;

use crate::utils::document_store::StoreError;

pub mod cascade;
pub use cascade::*;

pub mod invitations;
pub use invitations::*;

pub mod message;
pub use message::*;

pub mod notification;
pub use notification::*;

pub mod task;
pub use task::*;

pub mod team;
pub use team::*;

pub mod user;
pub use user::*;

// Errors surfaced to HTTP callers; the payload is the client-facing message
#[derive(Debug, Display, PartialEq)]
pub enum ServiceError {
    #[display(fmt = "Internal Server Error: {}", _0)]
    InternalServerError(String),
    #[display(fmt = "BadRequest: {}", _0)]
    BadRequest(String),
    #[display(fmt = "Not Found: {}", _0)]
    NotFound(String),
    #[display(fmt = "Forbidden: {}", _0)]
    Forbidden(String),
    #[display(fmt = "Conflict: {}", _0)]
    Conflict(String),
}

impl ServiceError {
    pub fn message(&self) -> &str {
        match self {
            ServiceError::InternalServerError(msg)
            | ServiceError::BadRequest(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::Forbidden(msg)
            | ServiceError::Conflict(msg) => msg,
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        error!("❌ Store failure: {}", err);
        ServiceError::InternalServerError("Internal Server Error".to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "message": self.message() }))
    }
}
