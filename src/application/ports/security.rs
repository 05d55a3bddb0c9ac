// src/application/ports/security.rs
use crate::application::{
    ApplicationResult,
    dto::{AuthTokenDto, TokenClaims, TokenSubject},
};
use async_trait::async_trait;

#[async_trait]
pub trait TokenManager: Send + Sync {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto>;
    /// Fails with `ApplicationError::Unauthorized` for malformed, forged or
    /// expired tokens.
    async fn authenticate(&self, token: &str) -> ApplicationResult<TokenClaims>;
}
