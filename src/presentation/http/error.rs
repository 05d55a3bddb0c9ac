// src/presentation/http/error.rs
use crate::application::{
    ApplicationResult,
    error::{ApplicationError, FieldViolation},
};
use crate::domain::errors::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Body of every 400/401/403/500 response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
}

/// Body of a uniqueness conflict.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConflictResponse {
    pub valid: bool,
    pub param: String,
    pub message: String,
}

#[derive(Debug)]
enum Body {
    Error(ErrorResponse),
    Conflict(ConflictResponse),
    Empty,
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    body: Body,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Validation(violations) => Self::invalid(violations),
            ApplicationError::NotFound(_) => Self::not_found(),
            ApplicationError::Conflict(violation) => Self::conflict(violation),
            ApplicationError::Unauthorized(msg) => Self::message(StatusCode::UNAUTHORIZED, msg),
            ApplicationError::Forbidden(msg) => Self::message(StatusCode::FORBIDDEN, msg),
            ApplicationError::Infrastructure(msg) => Self::internal(&msg),
            ApplicationError::Domain(domain_err) => Self::from_domain(domain_err),
        }
    }

    fn from_domain(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => {
                let violation = FieldViolation::new("body", msg);
                Self::invalid(vec![violation])
            }
            DomainError::NotFound(_) => Self::not_found(),
            DomainError::Conflict(_) => Self::conflict(FieldViolation::new(
                "title",
                crate::application::commands::articles::TITLE_TAKEN,
            )),
            DomainError::Persistence(msg) => Self::internal(&msg),
        }
    }

    fn invalid(violations: Vec<FieldViolation>) -> Self {
        let message = violations
            .first()
            .map(|violation| violation.message.clone())
            .unwrap_or_else(|| "invalid request".into());
        Self {
            status: StatusCode::BAD_REQUEST,
            body: Body::Error(ErrorResponse {
                error: reason(StatusCode::BAD_REQUEST),
                message,
                errors: Some(violations),
            }),
        }
    }

    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: Body::Empty,
        }
    }

    fn conflict(violation: FieldViolation) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            body: Body::Conflict(ConflictResponse {
                valid: false,
                param: violation.param,
                message: violation.message,
            }),
        }
    }

    fn message(status: StatusCode, message: String) -> Self {
        Self {
            status,
            body: Body::Error(ErrorResponse {
                error: reason(status),
                message,
                errors: None,
            }),
        }
    }

    fn internal(detail: &str) -> Self {
        tracing::error!(error = %detail, "request failed");
        Self::message(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".into(),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

fn reason(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("error").to_string()
}

impl From<ApplicationError> for HttpError {
    fn from(err: ApplicationError) -> Self {
        Self::from_error(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self.body {
            Body::Error(payload) => (self.status, Json(payload)).into_response(),
            Body::Conflict(payload) => (self.status, Json(payload)).into_response(),
            Body::Empty => self.status.into_response(),
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
