// src/presentation/http/extractors.rs
use crate::application::{
    binding::{BoundFields, FieldSet, bind_body, bind_list_query},
    dto::Identity,
    error::ApplicationError,
    queries::articles::ListArticlesQuery,
};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderMap, Uri, request::Parts},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde_json::Value;
use std::marker::PhantomData;

use super::error::HttpError;

/// Query parameter accepted as a fallback for the bearer header.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Reads the presented credential: the bearer header wins over the
/// `access_token` query parameter.
pub fn credential_from(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    if let Some(header) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(header.token().to_string());
    }

    let query = uri.query()?;
    serde_urlencoded::from_str::<Vec<(String, String)>>(query)
        .ok()?
        .into_iter()
        .rev()
        .find(|(key, value)| key == ACCESS_TOKEN_PARAM && !value.is_empty())
        .map(|(_, value)| value)
}

/// Identity established by the access gate; anonymous on public routes.
#[derive(Debug, Clone, Copy)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<Identity>()
            .copied()
            .unwrap_or_default();
        Ok(Self(identity))
    }
}

/// Bound and validated list parameters.
#[derive(Debug, Clone)]
pub struct ListParams(pub ListArticlesQuery);

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match parts.uri.query() {
            Some(query) => serde_urlencoded::from_str::<Vec<(String, String)>>(query)
                .map_err(|err| {
                    HttpError::from_error(ApplicationError::validation("query", err.to_string()))
                })?,
            None => Vec::new(),
        };

        bind_list_query(&pairs)
            .map(Self)
            .map_err(HttpError::from_error)
    }
}

/// JSON body bound against the field set `F` declares.
pub struct BoundBody<F: FieldSet>(pub BoundFields, PhantomData<F>);

impl<F: FieldSet> BoundBody<F> {
    pub fn into_inner(self) -> BoundFields {
        self.0
    }
}

impl<S, F> FromRequest<S> for BoundBody<F>
where
    S: Send + Sync,
    F: FieldSet,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                HttpError::from_error(ApplicationError::validation(
                    "body",
                    rejection.body_text(),
                ))
            })?;

        bind_body(F::FIELDS, body)
            .map(|fields| Self(fields, PhantomData))
            .map_err(HttpError::from_error)
    }
}
