// src/application/commands/articles/delete.rs
use super::{ArticleCommandService, ArticleTarget, identity::ensure_authenticated};
use crate::application::{
    dto::Identity,
    error::{ApplicationError, ApplicationResult},
};

pub struct DeleteArticleCommand {
    pub target: ArticleTarget,
}

impl ArticleCommandService {
    pub async fn delete_article(
        &self,
        actor: &Identity,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<()> {
        ensure_authenticated(actor)?;

        let Some(id) = command.target.resolve(actor)? else {
            return Err(ApplicationError::not_found("article not found"));
        };
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        self.write_repo.delete(article.id).await?;
        tracing::info!(article_id = %article.id, "article deleted");
        Ok(())
    }
}
