// src/presentation/http/middleware/require_access.rs
use crate::application::{auth::AccessPolicy, error::ApplicationError};
use crate::presentation::http::{error::HttpError, extractors::credential_from, state::HttpState};
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Runs the access gate for the policy a route was registered with and
/// stores the resulting `Identity` in the request extensions.
///
/// Usage: `axum::middleware::from_fn_with_state(AccessPolicy::Master, require_access)`
pub async fn require_access(
    State(policy): State<AccessPolicy>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(state) = req.extensions().get::<HttpState>().cloned() else {
        return HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
        .into_response();
    };

    let credential = credential_from(req.headers(), req.uri());
    match state.services.authorize(policy, credential.as_deref()).await {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(err) => {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                error = %err,
                "access denied"
            );
            HttpError::from_error(err).into_response()
        }
    }
}
