pub mod entity;
pub mod query;
pub mod repository;
pub mod value_objects;

pub use entity::{Article, ArticlePatch, NewArticle};
pub use query::{
    ArticleField, ArticleFilter, FieldSelection, ListCursor, SortDirection, SortField, SortKey,
};
pub use repository::{ArticleReadRepository, ArticleWriteRepository};
pub use value_objects::{ArticleContent, ArticleId, ArticleTitle};
