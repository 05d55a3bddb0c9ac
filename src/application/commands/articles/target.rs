use crate::{
    application::{
        dto::Identity,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

pub const SELF_ALIAS: &str = "me";

/// Article addressed by a request path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleTarget {
    /// The article owned by the caller's token.
    Me,
    Id(ArticleId),
    /// Not a valid id; nothing stored can match it.
    Unknown,
}

impl ArticleTarget {
    pub fn parse(raw: &str) -> Self {
        if raw == SELF_ALIAS {
            return Self::Me;
        }
        ArticleId::parse(raw).map_or(Self::Unknown, Self::Id)
    }

    /// `None` means the target cannot exist.
    pub fn resolve(self, actor: &Identity) -> ApplicationResult<Option<ArticleId>> {
        match self {
            Self::Id(id) => Ok(Some(id)),
            Self::Unknown => Ok(None),
            Self::Me => {
                let subject = actor.user_id().ok_or_else(|| {
                    ApplicationError::validation(
                        "id",
                        "'me' can only be used with an article token",
                    )
                })?;
                Ok(Some(ArticleId::new(i64::from(subject))?))
            }
        }
    }
}
