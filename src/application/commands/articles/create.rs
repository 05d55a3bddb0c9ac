// src/application/commands/articles/create.rs
use super::{
    ArticleCommandService,
    identity::ensure_master,
    service::{field_error, map_write_error},
};
use crate::{
    application::{
        binding::BoundFields,
        dto::{CreatedArticleDto, Identity, TokenSubject},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleContent, ArticleTitle, NewArticle},
        user::{Role, UserId},
    },
};

pub struct CreateArticleCommand {
    pub title: String,
    pub content: Option<String>,
}

impl TryFrom<BoundFields> for CreateArticleCommand {
    type Error = ApplicationError;

    fn try_from(mut fields: BoundFields) -> Result<Self, Self::Error> {
        Ok(Self {
            title: fields.require_text("title")?,
            content: fields.optional_text("content"),
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        actor: &Identity,
        command: CreateArticleCommand,
    ) -> ApplicationResult<CreatedArticleDto> {
        ensure_master(actor)?;

        let title = ArticleTitle::new(command.title).map_err(field_error("title"))?;
        let content = command
            .content
            .map(ArticleContent::new)
            .transpose()
            .map_err(field_error("content"))?;
        let now = self.clock.now();

        let created = self
            .write_repo
            .insert(NewArticle::new(title, content, now))
            .await
            .map_err(map_write_error)?;

        let subject = TokenSubject::new(UserId::new(i64::from(created.id))?, Role::User);
        let token = self.token_manager.issue(subject).await?;

        tracing::info!(article_id = %created.id, "article created");
        Ok(CreatedArticleDto {
            token: token.token,
            article: created.into(),
        })
    }
}
