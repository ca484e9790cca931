use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::repositories::post_repository::StoreError;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("post not found")]
    NotFound,
    #[error("store failure")]
    Store(#[from] StoreError),
}

impl ResponseError for PostError {
    fn status_code(&self) -> StatusCode {
        match self {
            PostError::NotFound => StatusCode::NOT_FOUND,
            PostError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let PostError::Store(cause) = self {
            error!("post store failure: {cause}");
        }
        let status = self.status_code();
        HttpResponse::build(status)
            .json(ErrorResponse::new(status.as_u16(), self.to_string()))
    }
}

/// Wire shape of every error body:
/// `{ "code": "400", "message": "...", "validation": [ {fieldName, errorMessage} ] }`
/// with `validation` empty unless the failure is field validation.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub validation: Vec<ValidationTuple>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationTuple {
    pub field_name: String,
    pub error_message: String,
}

impl ErrorResponse {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            validation: Vec::new(),
        }
    }

    pub fn add_validation(
        &mut self,
        field_name: impl Into<String>,
        error_message: impl Into<String>,
    ) {
        self.validation.push(ValidationTuple {
            field_name: field_name.into(),
            error_message: error_message.into(),
        });
    }

    /// One entry per invalid field, sorted by field name so the body is
    /// deterministic.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut body = Self::new(400, "invalid request");
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(name, _)| *name);
        for (name, field_errors) in fields {
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_deref())
                .unwrap_or("invalid value");
            body.add_validation(name, message);
        }
        body
    }
}
