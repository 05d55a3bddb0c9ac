// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, TokenClaims, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use crate::infrastructure::security::claims::parse_claims;
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

const TOKEN_CODE: &str = r#"
    subject({sid});
    role({role});
    issued_at({issued});
    expires_at({exp});
    check if time($now), $now >= {issued};
    check if time($now), $now <= {exp};
    token_type("access");
    check if token_type("access");
"#;

/// Issues and verifies Ed25519-signed biscuit access tokens.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let keypair = KeyPair::from(&private);
        let public = keypair.public();

        Ok(Self {
            root: Arc::new(keypair),
            public,
            ttl,
        })
    }
}

fn token_params(
    subject: &TokenSubject,
    issued_at: SystemTime,
    expires_at: SystemTime,
) -> HashMap<String, Term> {
    let mut params: HashMap<String, Term> = HashMap::new();
    params.insert("sid".to_string(), i64::from(subject.subject_id).into());
    params.insert("role".to_string(), subject.role.as_str().into());
    params.insert("issued".to_string(), issued_at.into());
    params.insert("exp".to_string(), expires_at.into());
    params
}

fn build_and_serialize_biscuit(
    params: HashMap<String, Term>,
    root: &KeyPair,
) -> ApplicationResult<String> {
    let token = Biscuit::builder()
        .code_with_params(TOKEN_CODE, params, HashMap::new())
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .build(root)
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    token
        .seal()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .to_base64()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;

        let token = build_and_serialize_biscuit(
            token_params(&subject, issued_at, expires_at),
            self.root.as_ref(),
        )?;

        Ok(AuthTokenDto {
            token,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
            expires_in: i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<TokenClaims> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        // Token checks carry the validity window; the authorizer only supplies time.
        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code("allow if true;")
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer
            .authorize()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let view = biscuit
            .authorizer()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;
        let (facts, _, _, _) = view.dump();

        parse_claims(facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, UserId};

    const KEY_HEX: &str = "0c1f4c7b0f7d3f3a2b1c9e8d7f6a5b4c3d2e1f0a9b8c7d6e5f4a3b2c1d0e9f8a";
    const OTHER_KEY_HEX: &str = "1d2e3f4a5b6c7d8e9fa0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b9c0d1e2";

    fn manager(key: &str, ttl: Duration) -> BiscuitTokenManager {
        BiscuitTokenManager::new(key, ttl).expect("valid key")
    }

    #[tokio::test]
    async fn issued_token_authenticates_with_subject_and_role() {
        let tokens = manager(KEY_HEX, Duration::from_secs(600));
        let subject = TokenSubject::new(UserId(7), Role::User);

        let issued = tokens.issue(subject).await.unwrap();
        assert_eq!(issued.expires_in, 600);

        let claims = tokens.authenticate(&issued.token).await.unwrap();
        assert_eq!(claims.subject_id, UserId(7));
        assert_eq!(claims.role, Role::User);
        assert!(claims.expires_at > claims.issued_at);
    }

    #[tokio::test]
    async fn token_from_another_key_is_rejected() {
        let issuer = manager(OTHER_KEY_HEX, Duration::from_secs(600));
        let verifier = manager(KEY_HEX, Duration::from_secs(600));
        let issued = issuer
            .issue(TokenSubject::new(UserId(1), Role::Admin))
            .await
            .unwrap();

        let err = verifier.authenticate(&issued.token).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        let tokens = manager(KEY_HEX, Duration::from_secs(600));
        let err = tokens.authenticate("not-a-token").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let tokens = manager(KEY_HEX, Duration::ZERO);
        let issued = tokens
            .issue(TokenSubject::new(UserId(3), Role::User))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;

        let err = tokens.authenticate(&issued.token).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[test]
    fn malformed_key_is_rejected() {
        assert!(BiscuitTokenManager::new("abc", Duration::from_secs(1)).is_err());
    }
}
