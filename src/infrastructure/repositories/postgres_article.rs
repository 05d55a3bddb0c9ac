// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleContent, ArticleField, ArticleFilter, ArticleId, ArticleReadRepository,
    ArticleTitle, ArticleWriteRepository, FieldSelection, ListCursor, NewArticle,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str = "id, title, content, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    content: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            content: row.content.map(ArticleContent::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Escapes LIKE metacharacters so keywords match literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ArticleFilter) {
    if let Some(term) = filter.term() {
        let pattern = like_pattern(term);
        builder.push(" WHERE (title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR content ILIKE ");
        builder.push_bind(pattern);
        builder.push(" ESCAPE '\\')");
    }
}

fn push_order(builder: &mut QueryBuilder<'_, Postgres>, cursor: &ListCursor) {
    builder.push(" ORDER BY ");
    for key in &cursor.sort {
        builder.push(key.field.column());
        builder.push(" ");
        builder.push(key.direction.as_sql());
        builder.push(", ");
    }
    builder.push("id ASC");
}

fn i64_from<T: TryInto<i64>>(value: T) -> DomainResult<i64> {
    value
        .try_into()
        .map_err(|_| DomainError::Validation("pagination value out of range".into()))
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            content,
            created_at,
            updated_at,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(
            "INSERT INTO articles (title, content, created_at, updated_at) VALUES ($1, $2, $3, $4) RETURNING id, title, content, created_at, updated_at",
        )
        .bind(title.as_str())
        .bind(content.as_ref().map(ArticleContent::as_str))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, article: &Article) -> DomainResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "UPDATE articles SET title = $1, content = $2, updated_at = $3 WHERE id = $4 RETURNING id, title, content, created_at, updated_at",
        )
        .bind(article.title.as_str())
        .bind(article.content.as_ref().map(ArticleContent::as_str))
        .bind(article.updated_at)
        .bind(i64::from(article.id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from)
            .transpose()?
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleRepository {
    async fn count(&self, filter: &ArticleFilter) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM articles");
        push_filter(&mut builder, filter);

        let total: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        u64::try_from(total).map_err(|err| DomainError::Persistence(err.to_string()))
    }

    async fn find(
        &self,
        filter: &ArticleFilter,
        selection: &FieldSelection,
        cursor: &ListCursor,
    ) -> DomainResult<Vec<Article>> {
        // content is the only column worth skipping; the rest are needed to
        // rebuild the entity.
        let columns = if selection.includes(ArticleField::Content) {
            ARTICLE_COLUMNS
        } else {
            "id, title, NULL::text AS content, created_at, updated_at"
        };

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(columns);
        builder.push(" FROM articles");
        push_filter(&mut builder, filter);
        push_order(&mut builder, cursor);
        builder.push(" LIMIT ");
        builder.push_bind(i64_from(cursor.limit)?);
        builder.push(" OFFSET ");
        builder.push_bind(i64_from(cursor.offset())?);

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Article::try_from).collect()
    }

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, content, created_at, updated_at FROM articles WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn order_clause_appends_id_tiebreak() {
        use crate::domain::article::{SortDirection, SortField, SortKey};

        let cursor = ListCursor {
            page: 1,
            limit: 10,
            sort: vec![
                SortKey::new(SortField::Title, SortDirection::Asc),
                SortKey::new(SortField::CreatedAt, SortDirection::Desc),
            ],
        };
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT 1");
        push_order(&mut builder, &cursor);
        assert_eq!(
            builder.sql(),
            "SELECT 1 ORDER BY title ASC, created_at DESC, id ASC"
        );
    }
}
