// tests/support/helpers.rs
use super::mocks;
use article_desk::application::{
    auth::MasterKey,
    ports::{security::TokenManager, time::Clock},
    services::ApplicationServices,
};
use article_desk::presentation::http::{routes::build_router, state::HttpState};
use axum::body::{self, Body};
use axum::http::{
    Method, Request, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt as _;

/// 記録用リポジトリと決定論的トークンでサービスを組み立てる
pub fn build_test_services(repo: Arc<mocks::RecordingArticleRepo>) -> ApplicationServices {
    build_services_with(repo, Arc::new(mocks::StaticTokenManager))
}

pub fn build_services_with(
    repo: Arc<mocks::RecordingArticleRepo>,
    token_manager: Arc<dyn TokenManager>,
) -> ApplicationServices {
    let clock: Arc<dyn Clock> = Arc::new(mocks::FixedClock);
    ApplicationServices::new(
        repo.clone(),
        repo,
        token_manager,
        MasterKey::new(mocks::MASTER_KEY).expect("master key"),
        clock,
    )
}

/// テスト用ルーター。リポジトリを返すので書き込み回数を検証できる。
pub fn make_test_router() -> (axum::Router, Arc<mocks::RecordingArticleRepo>) {
    let repo = Arc::new(mocks::RecordingArticleRepo::new());
    let services = Arc::new(build_test_services(Arc::clone(&repo)));
    (build_router(HttpState { services }, &[]), repo)
}

pub fn router_with_token_manager(token_manager: Arc<dyn TokenManager>) -> axum::Router {
    let repo = Arc::new(mocks::RecordingArticleRepo::new());
    let services = Arc::new(build_services_with(repo, token_manager));
    build_router(HttpState { services }, &[])
}

pub struct TestResponse {
    pub status: StatusCode,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).expect("expected a JSON body")
    }
}

/// リクエストを一件送り、ステータスとボディを返す
pub async fn send(
    app: &axum::Router,
    method: Method,
    uri: &str,
    credential: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(credential) = credential {
        builder = builder.header(AUTHORIZATION, format!("Bearer {credential}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec();
    TestResponse { status, bytes }
}

/// マスターキーで記事を作成し、レスポンス JSON を返す
pub async fn create_article(app: &axum::Router, title: &str, content: &str) -> Value {
    let response = send(
        app,
        Method::POST,
        "/articles",
        Some(mocks::MASTER_KEY),
        Some(serde_json::json!({ "title": title, "content": content })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "create {title}");
    response.json()
}

/// ErrorResponse 形式の JSON であることを検証する
pub fn assert_error_response(response: &TestResponse, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(response.status, expected_status);
    let json = response.json();
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
