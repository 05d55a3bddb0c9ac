use crate::domain::article::{
    Article, ArticleFilter, ArticleId, ArticleReadRepository, ArticleWriteRepository,
    FieldSelection, ListCursor, NewArticle,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Store {
    last_id: i64,
    rows: BTreeMap<ArticleId, Article>,
}

impl Store {
    fn title_taken(&self, title: &str, except: Option<ArticleId>) -> bool {
        self.rows
            .values()
            .any(|row| Some(row.id) != except && row.title.as_str() == title)
    }
}

/// Process-local article store. Uniqueness of titles is checked under the
/// write lock, so concurrent inserts cannot both win.
#[derive(Default)]
pub struct InMemoryArticleRepository {
    store: RwLock<Store>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|_| DomainError::Persistence("article store lock poisoned".into()))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Store>> {
        self.store
            .write()
            .map_err(|_| DomainError::Persistence("article store lock poisoned".into()))
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut store = self.write()?;
        if store.title_taken(article.title.as_str(), None) {
            return Err(DomainError::Conflict("title already exists".into()));
        }

        store.last_id += 1;
        let id = ArticleId::new(store.last_id)?;
        let NewArticle {
            title,
            content,
            created_at,
            updated_at,
        } = article;
        let row = Article {
            id,
            title,
            content,
            created_at,
            updated_at,
        };
        store.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, article: &Article) -> DomainResult<Article> {
        let mut store = self.write()?;
        if !store.rows.contains_key(&article.id) {
            return Err(DomainError::NotFound("article not found".into()));
        }
        if store.title_taken(article.title.as_str(), Some(article.id)) {
            return Err(DomainError::Conflict("title already exists".into()));
        }
        store.rows.insert(article.id, article.clone());
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut store = self.write()?;
        store
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleRepository {
    async fn count(&self, filter: &ArticleFilter) -> DomainResult<u64> {
        let store = self.read()?;
        let count = store.rows.values().filter(|row| filter.matches(row)).count();
        u64::try_from(count).map_err(|err| DomainError::Persistence(err.to_string()))
    }

    async fn find(
        &self,
        filter: &ArticleFilter,
        _selection: &FieldSelection,
        cursor: &ListCursor,
    ) -> DomainResult<Vec<Article>> {
        let store = self.read()?;
        let mut rows: Vec<Article> = store
            .rows
            .values()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();
        rows.sort_by(|a, b| cursor.compare(a, b));

        let offset = usize::try_from(cursor.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(cursor.limit).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let store = self.read()?;
        Ok(store.rows.get(&id).cloned())
    }
}
