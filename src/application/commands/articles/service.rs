// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{error::ApplicationError, ports::{security::TokenManager, time::Clock}},
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository},
        errors::DomainError,
    },
};

pub const TITLE_TAKEN: &str = "title already registered";

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) token_manager: Arc<dyn TokenManager>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            token_manager,
            clock,
        }
    }
}

/// Title is the only unique column, so any write conflict is reported on it.
pub(super) fn map_write_error(err: DomainError) -> ApplicationError {
    match err {
        DomainError::Conflict(_) => ApplicationError::conflict("title", TITLE_TAKEN),
        other => ApplicationError::from(other),
    }
}

/// Blames a value-object rejection on the request field it came from.
pub(super) fn field_error(param: &'static str) -> impl Fn(DomainError) -> ApplicationError {
    move |err| match err {
        DomainError::Validation(message) => ApplicationError::validation(param, message),
        other => ApplicationError::from(other),
    }
}
