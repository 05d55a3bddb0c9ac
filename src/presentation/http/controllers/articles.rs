// src/presentation/http/controllers/articles.rs
use crate::application::{
    binding::{CreateArticleFields, UpdateArticleFields},
    commands::articles::{
        ArticleTarget, CreateArticleCommand, DeleteArticleCommand, UpdateArticleCommand,
    },
    dto::{ArticleDto, ArticleListDto, CreatedArticleDto, PublicArticleDto},
    queries::articles::GetArticleQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{BoundBody, CurrentIdentity, ListParams};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

/// Documentation shape of a create body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: Option<String>,
}

/// Documentation shape of an update body; absent keys are left untouched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[utoipa::path(
    get,
    path = "/articles",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive keyword over title and content"),
        ("fields" = Option<String>, Query, description = "Comma list of fields to include, or of `-field` to exclude"),
        ("page" = Option<u32>, Query, description = "1..=30, default 1"),
        ("limit" = Option<u32>, Query, description = "1..=100, default 30"),
        ("sort" = Option<String>, Query, description = "Comma list of fields, `-` for descending; default `-createdAt`")
    ),
    responses(
        (status = 200, description = "A page of articles and the total match count.", body = ArticleListDto),
        (status = 400, description = "Invalid query parameters.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Missing or invalid credential.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Role not allowed.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    ListParams(query): ListParams,
) -> HttpResult<Json<ArticleListDto>> {
    let page = state
        .services
        .article_queries
        .list_articles(query)
        .await
        .into_http()?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/articles/{id}",
    params(("id" = String, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article.", body = PublicArticleDto),
        (status = 404, description = "No such article.")
    ),
    security(()),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<String>,
) -> HttpResult<Json<PublicArticleDto>> {
    let article = state
        .services
        .article_queries
        .get_article(GetArticleQuery { id })
        .await
        .into_http()?;
    Ok(Json(article))
}

#[utoipa::path(
    post,
    path = "/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created; the token authenticates as this article.", body = CreatedArticleDto),
        (status = 400, description = "Invalid body.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Master key required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Title already registered.", body = crate::presentation::http::error::ConflictResponse)
    ),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    CurrentIdentity(actor): CurrentIdentity,
    body: BoundBody<CreateArticleFields>,
) -> HttpResult<(StatusCode, Json<CreatedArticleDto>)> {
    let command = CreateArticleCommand::try_from(body.into_inner()).into_http()?;
    let created = state
        .services
        .article_commands
        .create_article(&actor, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/articles/{id}",
    params(("id" = String, Path, description = "Article id, or `me` for the token's own article")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "The updated article.", body = ArticleDto),
        (status = 400, description = "Invalid body.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Missing or invalid credential.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such article."),
        (status = 409, description = "Title already registered.", body = crate::presentation::http::error::ConflictResponse)
    ),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    CurrentIdentity(actor): CurrentIdentity,
    Path(id): Path<String>,
    body: BoundBody<UpdateArticleFields>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand::from_fields(ArticleTarget::parse(&id), body.into_inner());
    let article = state
        .services
        .article_commands
        .update_article(&actor, command)
        .await
        .into_http()?;
    Ok(Json(article))
}

#[utoipa::path(
    delete,
    path = "/articles/{id}",
    params(("id" = String, Path, description = "Article id, or `me` for the token's own article")),
    responses(
        (status = 204, description = "Article removed."),
        (status = 401, description = "Missing or invalid credential.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such article.")
    ),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    CurrentIdentity(actor): CurrentIdentity,
    Path(id): Path<String>,
) -> HttpResult<StatusCode> {
    state
        .services
        .article_commands
        .delete_article(
            &actor,
            DeleteArticleCommand {
                target: ArticleTarget::parse(&id),
            },
        )
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
