// src/application/error.rs
use crate::domain::errors::DomainError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// A single rejected input, named by the request parameter that carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub param: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            message: message.into(),
        }
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{}: {}", violation.param, violation.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {}", describe(.0))]
    Validation(Vec<FieldViolation>),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {} {}", .0.param, .0.message)]
    Conflict(FieldViolation),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation(vec![FieldViolation::new(param, msg)])
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Conflict(FieldViolation::new(param, msg))
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }
}
