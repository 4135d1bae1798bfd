// src/handlers/error_handlers.rs - turns every failure into an HTTP response

use std::collections::BTreeMap;

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use thiserror::Error;
use validator::ValidationErrors;

use crate::AppState;
use crate::logging::Logger;
use crate::services::ServiceError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// field name -> messages, keys sorted
    #[error("validation failed")]
    Validation(BTreeMap<String, Vec<String>>),
    #[error("The value '{0}' already exists. Please try another value.")]
    Duplicate(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to find input for: '{0}'")]
    TypeMismatch(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Internal server error")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::Duplicate(_)
            | ApiError::TypeMismatch(_)
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            ApiError::Validation(fields) => builder.json(fields),
            _ => builder
                .insert_header(ContentType::plaintext())
                .body(self.to_string()),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(e) => ApiError::NotFound(e.to_string()),
            ServiceError::Conflict { value } => ApiError::Duplicate(value),
            ServiceError::Internal(cause) => ApiError::Internal(cause),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        ApiError::Validation(fields)
    }
}

/// Logger for the HTTP boundary, taken from `AppState` when one is registered.
pub fn boundary_logger(req: &HttpRequest) -> Logger {
    req.app_data::<web::Data<AppState>>()
        .map(|state| state.log.clone())
        .unwrap_or_else(|| Logger::process("blog_be::http"))
}

pub fn type_mismatch(req: &HttpRequest, raw: &str) -> ApiError {
    boundary_logger(req).error(format_args!("Failed to convert {} to ID", raw));
    ApiError::TypeMismatch(raw.to_string())
}

/// Path segments that fail to parse (e.g. `/posts/abc`) become a 400.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, req: &HttpRequest| {
        let raw = req
            .match_info()
            .iter()
            .map(|(_, value)| value.to_string())
            .next()
            .unwrap_or_else(|| err.to_string());
        type_mismatch(req, &raw).into()
    })
}

/// Malformed JSON bodies become a 400 carrying the parser message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, req: &HttpRequest| {
        boundary_logger(req).warn(format_args!("Rejected request body: {}", err));
        ApiError::BadRequest(err.to_string()).into()
    })
}
