// tests/support/mocks/security.rs
use article_desk::application::{
    ApplicationResult,
    dto::{AuthTokenDto, TokenClaims, TokenSubject},
    error::ApplicationError,
    ports::security::TokenManager,
};
use article_desk::domain::user::{Role, UserId};
use async_trait::async_trait;
use chrono::Duration;

/// テスト用トークン定数（タイポ防止とIDE補完のため）
pub const MASTER_KEY: &str = "test-master-key";
pub const USER_TOKEN: &str = "user-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

const ISSUED_PREFIX: &str = "issued-";

/// `issue` が返すトークン文字列
pub fn issued_token(subject_id: i64) -> String {
    format!("{ISSUED_PREFIX}{subject_id}")
}

/* -------------------------------- TokenManager -------------------------------- */

/// 決定論的なトークンマネージャ。
///
/// - `user-token`: 記事 1 の user ロール
/// - `admin-token`: 記事 2 の admin ロール
/// - `issued-{id}`: `issue` が発行した user ロール
#[derive(Clone, Debug, Default)]
pub struct StaticTokenManager;

fn claims(id: i64, role: Role) -> ApplicationResult<TokenClaims> {
    let now = super::time::fixed_now();
    Ok(TokenClaims {
        subject_id: UserId::new(id)?,
        role,
        issued_at: now,
        expires_at: now + Duration::hours(1),
    })
}

#[async_trait]
impl TokenManager for StaticTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = super::time::fixed_now();
        Ok(AuthTokenDto {
            token: issued_token(i64::from(subject.subject_id)),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<TokenClaims> {
        match token {
            USER_TOKEN => claims(1, Role::User),
            ADMIN_TOKEN => claims(2, Role::Admin),
            // 期限切れトークンは認証時に拒否される
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("expired token")),
            other => match other
                .strip_prefix(ISSUED_PREFIX)
                .and_then(|id| id.parse::<i64>().ok())
            {
                Some(id) => claims(id, Role::User),
                None => Err(ApplicationError::unauthorized("invalid token")),
            },
        }
    }
}
