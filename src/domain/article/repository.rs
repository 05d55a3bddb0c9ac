use crate::domain::article::entity::{Article, NewArticle};
use crate::domain::article::query::{ArticleFilter, FieldSelection, ListCursor};
use crate::domain::article::value_objects::ArticleId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Writes report a duplicate title as `DomainError::Conflict`.
#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    async fn update(&self, article: &Article) -> DomainResult<Article>;
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn count(&self, filter: &ArticleFilter) -> DomainResult<u64>;
    /// `selection` is a hint: stores may skip loading unselected columns.
    async fn find(
        &self,
        filter: &ArticleFilter,
        selection: &FieldSelection,
        cursor: &ListCursor,
    ) -> DomainResult<Vec<Article>>;
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
}
