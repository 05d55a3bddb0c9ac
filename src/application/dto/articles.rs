use crate::domain::article::{Article, ArticleContent, ArticleField, FieldSelection};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

/// Owner view: the complete record, never projected.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            content: article.content.map(ArticleContent::into_inner),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// Public view: safe for any caller, honours a field selection.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicArticleDto {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "serde_time::option"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "serde_time::option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PublicArticleDto {
    pub fn project(article: Article, selection: &FieldSelection) -> Self {
        let keep = |field| selection.includes(field);
        Self {
            id: article.id.into(),
            title: keep(ArticleField::Title).then(|| article.title.into_inner()),
            content: if keep(ArticleField::Content) {
                article.content.map(ArticleContent::into_inner)
            } else {
                None
            },
            created_at: keep(ArticleField::CreatedAt).then_some(article.created_at),
            updated_at: keep(ArticleField::UpdatedAt).then_some(article.updated_at),
        }
    }
}

impl From<Article> for PublicArticleDto {
    fn from(article: Article) -> Self {
        Self::project(article, &FieldSelection::All)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArticleListDto {
    pub rows: Vec<PublicArticleDto>,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedArticleDto {
    pub token: String,
    pub article: ArticleDto,
}
