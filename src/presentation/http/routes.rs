// src/presentation/http/routes.rs
use crate::application::auth::AccessPolicy;
use crate::domain::user::Role;
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::articles,
    middleware::require_access,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::{MethodRouter, get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Listing is for article tokens with the plain user role.
const LIST_POLICY: AccessPolicy = AccessPolicy::user(&[Role::User]);

fn guarded(route: MethodRouter, policy: AccessPolicy) -> MethodRouter {
    route.route_layer(from_fn_with_state(policy, require_access))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    let collection = guarded(get(articles::list_articles), LIST_POLICY).merge(guarded(
        post(articles::create_article),
        AccessPolicy::Master,
    ));

    let member = get(articles::get_article).merge(guarded(
        axum::routing::put(articles::update_article).delete(articles::delete_article),
        AccessPolicy::any_user(),
    ));

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/articles", collection)
        .route("/articles/{id}", member)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
