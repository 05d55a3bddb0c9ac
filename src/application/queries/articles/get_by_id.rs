use super::ArticleQueryService;
use crate::{
    application::{
        dto::PublicArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

pub struct GetArticleQuery {
    pub id: String,
}

impl ArticleQueryService {
    pub async fn get_article(&self, query: GetArticleQuery) -> ApplicationResult<PublicArticleDto> {
        let Some(id) = ArticleId::parse(&query.id) else {
            return Err(ApplicationError::not_found("article not found"));
        };
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;
        Ok(article.into())
    }
}
