use std::collections::BTreeMap;
use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;

use crate::constants::{CODE_DATABASE_ERROR, CODE_SERIALIZATION_ERROR, ERR_VALIDATION_FAILED};
use crate::models::ErrorResponse;

/// Field name -> messages for every rule the field failed.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    InternalServerError { code: String, message: String },
    ValidationError { code: String, errors: FieldErrors },
}

impl ApiError {
    pub fn bad_request(code: &str, message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(code: &str, message: impl Into<String>) -> Self {
        ApiError::NotFound {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn internal(code: &str, message: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest { code, message } => {
                write!(f, "Bad Request [{}]: {}", code, message)
            }
            ApiError::NotFound { code, message } => {
                write!(f, "Not Found [{}]: {}", code, message)
            }
            ApiError::InternalServerError { code, message } => {
                write!(f, "Internal Server Error [{}]: {}", code, message)
            }
            ApiError::ValidationError { code, errors } => {
                write!(f, "Validation Error [{}]: {:?}", code, errors)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::ValidationError { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest { code, message } => {
                HttpResponse::BadRequest().json(ErrorResponse {
                    success: false,
                    code: code.clone(),
                    message: message.clone(),
                    errors: None,
                })
            }
            // Not-found responses carry no body.
            ApiError::NotFound { .. } => HttpResponse::NotFound().finish(),
            ApiError::InternalServerError { code, message } => {
                error!("Internal server error [{}]: {}", code, message);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    success: false,
                    code: code.clone(),
                    message: message.clone(),
                    errors: None,
                })
            }
            ApiError::ValidationError { code, errors } => {
                HttpResponse::BadRequest().json(ErrorResponse {
                    success: false,
                    code: code.clone(),
                    message: ERR_VALIDATION_FAILED.to_string(),
                    errors: Some(errors.clone()),
                })
            }
        }
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        ApiError::InternalServerError {
            code: CODE_DATABASE_ERROR.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InternalServerError {
            code: CODE_SERIALIZATION_ERROR.to_string(),
            message: err.to_string(),
        }
    }
}
