pub mod articles;
pub mod auth;
pub mod serde_time;

pub use articles::{ArticleDto, ArticleListDto, CreatedArticleDto, PublicArticleDto};
pub use auth::{AuthTokenDto, Identity, TokenClaims, TokenSubject};
