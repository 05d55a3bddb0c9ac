// src/domain/article/entity.rs
use crate::domain::article::value_objects::{ArticleContent, ArticleId, ArticleTitle};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub content: Option<ArticleContent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Merges the fields present in `patch`. Returns whether anything changed;
    /// `updated_at` only moves when it did.
    pub fn apply(&mut self, patch: ArticlePatch, now: DateTime<Utc>) -> bool {
        let mut changed = false;

        if let Some(title) = patch.title {
            if title != self.title {
                self.title = title;
                changed = true;
            }
        }

        if let Some(content) = patch.content {
            if content != self.content {
                self.content = content;
                changed = true;
            }
        }

        if changed {
            self.updated_at = now;
        }
        changed
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub content: Option<ArticleContent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewArticle {
    pub fn new(title: ArticleTitle, content: Option<ArticleContent>, now: DateTime<Utc>) -> Self {
        Self {
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `content: Some(None)` clears the content.
#[derive(Debug, Clone, Default)]
pub struct ArticlePatch {
    pub title: Option<ArticleTitle>,
    pub content: Option<Option<ArticleContent>>,
}

impl ArticlePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_article() -> Article {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Article {
            id: ArticleId::new(1).unwrap(),
            title: ArticleTitle::new("title").unwrap(),
            content: Some(ArticleContent::new("content").unwrap()),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn content_only_patch_keeps_title() {
        let mut article = sample_article();
        let now = article.updated_at + Duration::seconds(5);
        let patch = ArticlePatch {
            title: None,
            content: Some(Some(ArticleContent::new("fresh").unwrap())),
        };

        assert!(article.apply(patch, now));
        assert_eq!(article.title.as_str(), "title");
        assert_eq!(article.content.as_ref().map(ArticleContent::as_str), Some("fresh"));
        assert_eq!(article.updated_at, now);
    }

    #[test]
    fn explicit_null_clears_content() {
        let mut article = sample_article();
        let now = article.updated_at + Duration::seconds(1);
        let patch = ArticlePatch {
            title: None,
            content: Some(None),
        };

        assert!(article.apply(patch, now));
        assert!(article.content.is_none());
    }

    #[test]
    fn identical_values_do_not_touch_timestamp() {
        let mut article = sample_article();
        let before = article.updated_at;
        let patch = ArticlePatch {
            title: Some(ArticleTitle::new("title").unwrap()),
            content: None,
        };

        assert!(!article.apply(patch, before + Duration::seconds(9)));
        assert_eq!(article.updated_at, before);
    }
}
