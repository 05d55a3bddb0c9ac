//! Listing model handed to the read repository: keyword filter, field
//! projection and page/sort cursor.
use crate::domain::article::entity::Article;
use crate::domain::errors::DomainError;
use std::{cmp::Ordering, collections::BTreeSet, str::FromStr};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    keywords: Option<String>,
}

impl ArticleFilter {
    pub fn keywords(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self {
                keywords: Some(trimmed.to_lowercase()),
            }
        }
    }

    /// Lowercased keyword term, if any.
    pub fn term(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    pub fn matches(&self, article: &Article) -> bool {
        match &self.keywords {
            None => true,
            Some(term) => {
                article.title.as_str().to_lowercase().contains(term)
                    || article
                        .content
                        .as_ref()
                        .is_some_and(|content| content.as_str().to_lowercase().contains(term))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArticleField {
    Id,
    Title,
    Content,
    CreatedAt,
    UpdatedAt,
}

impl ArticleField {
    pub const ALL: [ArticleField; 5] = [
        ArticleField::Id,
        ArticleField::Title,
        ArticleField::Content,
        ArticleField::CreatedAt,
        ArticleField::UpdatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleField::Id => "id",
            ArticleField::Title => "title",
            ArticleField::Content => "content",
            ArticleField::CreatedAt => "createdAt",
            ArticleField::UpdatedAt => "updatedAt",
        }
    }
}

impl FromStr for ArticleField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArticleField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown field '{s}'")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldSelection {
    #[default]
    All,
    Include(BTreeSet<ArticleField>),
    Exclude(BTreeSet<ArticleField>),
}

impl FieldSelection {
    /// `id` is always part of a projection.
    pub fn includes(&self, field: ArticleField) -> bool {
        if field == ArticleField::Id {
            return true;
        }
        match self {
            FieldSelection::All => true,
            FieldSelection::Include(fields) => fields.contains(&field),
            FieldSelection::Exclude(fields) => !fields.contains(&field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            other => Err(DomainError::Validation(format!(
                "cannot sort by '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    fn compare(&self, a: &Article, b: &Article) -> Ordering {
        let ordering = match self.field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.as_str().cmp(b.title.as_str()),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCursor {
    pub page: u32,
    pub limit: u32,
    pub sort: Vec<SortKey>,
}

impl ListCursor {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Ordering used by stores that sort in memory. Ties fall back to id.
    pub fn compare(&self, a: &Article, b: &Article) -> Ordering {
        self.sort
            .iter()
            .map(|key| key.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}

impl Default for ListCursor {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 30,
            sort: vec![SortKey::new(SortField::CreatedAt, SortDirection::Desc)],
        }
    }
}
