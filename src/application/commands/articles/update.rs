use super::{
    ArticleCommandService, ArticleTarget, identity::ensure_authenticated,
    service::{field_error, map_write_error},
};
use crate::{
    application::{
        binding::{BoundFields, BoundValue},
        dto::{ArticleDto, Identity},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleContent, ArticlePatch, ArticleTitle},
};

pub struct UpdateArticleCommand {
    pub target: ArticleTarget,
    pub title: Option<String>,
    /// `Some(None)` clears the content.
    pub content: Option<Option<String>>,
}

impl UpdateArticleCommand {
    pub fn from_fields(target: ArticleTarget, mut fields: BoundFields) -> Self {
        let content = match fields.take("content") {
            Some(BoundValue::Text(text)) => Some(Some(text)),
            Some(BoundValue::Null) => Some(None),
            None => None,
        };
        Self {
            target,
            title: fields.optional_text("title"),
            content,
        }
    }
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        actor: &Identity,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_authenticated(actor)?;

        let UpdateArticleCommand {
            target,
            title,
            content,
        } = command;

        let id = target.resolve(actor)?;
        let patch = ArticlePatch {
            title: title
                .map(ArticleTitle::new)
                .transpose()
                .map_err(field_error("title"))?,
            content: content
                .map(|value| value.map(ArticleContent::new).transpose())
                .transpose()
                .map_err(field_error("content"))?,
        };

        let Some(id) = id else {
            return Err(ApplicationError::not_found("article not found"));
        };
        let mut article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if !article.apply(patch, self.clock.now()) {
            return Ok(article.into());
        }

        let updated = self
            .write_repo
            .update(&article)
            .await
            .map_err(map_write_error)?;

        tracing::info!(article_id = %updated.id, "article updated");
        Ok(updated.into())
    }
}
