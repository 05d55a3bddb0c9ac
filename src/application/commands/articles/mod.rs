// src/application/commands/articles/mod.rs
mod create;
mod delete;
mod identity;
mod service;
mod target;
mod update;

pub use create::CreateArticleCommand;
pub use delete::DeleteArticleCommand;
pub use service::{ArticleCommandService, TITLE_TAKEN};
pub use target::ArticleTarget;
pub use update::UpdateArticleCommand;
