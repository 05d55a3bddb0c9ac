use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleListDto, PublicArticleDto},
        error::ApplicationResult,
    },
    domain::article::{ArticleFilter, FieldSelection, ListCursor},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArticlesQuery {
    pub filter: ArticleFilter,
    pub selection: FieldSelection,
    pub cursor: ListCursor,
}

impl ArticleQueryService {
    pub async fn list_articles(&self, query: ListArticlesQuery) -> ApplicationResult<ArticleListDto> {
        let ListArticlesQuery {
            filter,
            selection,
            cursor,
        } = query;

        let (count, articles) = tokio::try_join!(
            self.read_repo.count(&filter),
            self.read_repo.find(&filter, &selection, &cursor),
        )?;

        let rows = articles
            .into_iter()
            .map(|article| PublicArticleDto::project(article, &selection))
            .collect();

        Ok(ArticleListDto { rows, count })
    }
}
