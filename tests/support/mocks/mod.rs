// tests/support/mocks/mod.rs
//! テストサポートモック再エクスポートモジュール
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod article_repos;
pub mod security;
pub mod time;

// 時刻関連
pub use time::{FixedClock, fixed_now};

// セキュリティ関連
pub use security::{
    ADMIN_TOKEN, EXPIRED_TOKEN, MASTER_KEY, StaticTokenManager, USER_TOKEN, issued_token,
};

// 記事リポジトリ
pub use article_repos::{RecordingArticleRepo, WriteCalls};
