// tests/support/mocks/article_repos.rs
use article_desk::domain::article::{
    Article, ArticleFilter, ArticleId, ArticleReadRepository, ArticleWriteRepository,
    FieldSelection, ListCursor, NewArticle,
};
use article_desk::domain::errors::DomainResult;
use article_desk::infrastructure::repositories::InMemoryArticleRepository;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 書き込み系呼び出しの回数
#[derive(Debug, Default)]
pub struct WriteCalls {
    pub insert: AtomicUsize,
    pub update: AtomicUsize,
    pub delete: AtomicUsize,
}

impl WriteCalls {
    pub fn total(&self) -> usize {
        self.insert.load(Ordering::SeqCst)
            + self.update.load(Ordering::SeqCst)
            + self.delete.load(Ordering::SeqCst)
    }
}

/// インメモリリポジトリに委譲しつつ書き込み呼び出しを記録する
#[derive(Default)]
pub struct RecordingArticleRepo {
    inner: InMemoryArticleRepository,
    pub calls: WriteCalls,
}

impl RecordingArticleRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleWriteRepository for RecordingArticleRepo {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        self.calls.insert.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(article).await
    }

    async fn update(&self, article: &Article) -> DomainResult<Article> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        self.inner.update(article).await
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id).await
    }
}

#[async_trait]
impl ArticleReadRepository for RecordingArticleRepo {
    async fn count(&self, filter: &ArticleFilter) -> DomainResult<u64> {
        self.inner.count(filter).await
    }

    async fn find(
        &self,
        filter: &ArticleFilter,
        selection: &FieldSelection,
        cursor: &ListCursor,
    ) -> DomainResult<Vec<Article>> {
        self.inner.find(filter, selection, cursor).await
    }

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        self.inner.find_by_id(id).await
    }
}
