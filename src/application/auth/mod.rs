//! Access gate: turns a presented credential into an [`Identity`] and
//! enforces the policy a route was registered with.
mod master_key;

pub use master_key::MasterKey;

use crate::application::{
    dto::Identity,
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use crate::domain::user::Role;
use std::sync::Arc;

/// Per-route access requirement, fixed when the route is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// No gate; the handler sees `Identity::Anonymous`.
    Public,
    /// A valid token whose role is listed, or the master key.
    User { roles: &'static [Role] },
    /// The master key and nothing else.
    Master,
}

impl AccessPolicy {
    pub const fn user(roles: &'static [Role]) -> Self {
        Self::User { roles }
    }

    pub const fn any_user() -> Self {
        Self::User { roles: Role::ALL }
    }
}

pub struct AuthGate {
    master_key: MasterKey,
    token_manager: Arc<dyn TokenManager>,
}

impl AuthGate {
    pub fn new(master_key: MasterKey, token_manager: Arc<dyn TokenManager>) -> Self {
        Self {
            master_key,
            token_manager,
        }
    }

    /// Classifies a credential without applying any policy.
    pub async fn identify(&self, credential: Option<&str>) -> ApplicationResult<Identity> {
        let Some(credential) = credential else {
            return Ok(Identity::Anonymous);
        };

        if self.master_key.matches(credential) {
            return Ok(Identity::Master);
        }

        let claims = self
            .token_manager
            .authenticate(credential)
            .await
            .map_err(|err| match err {
                ApplicationError::Unauthorized(_) => err,
                other => {
                    tracing::error!(error = %other, "token verification failed");
                    ApplicationError::unauthorized("invalid token")
                }
            })?;
        Ok(Identity::from(&claims))
    }

    pub async fn authorize(
        &self,
        policy: AccessPolicy,
        credential: Option<&str>,
    ) -> ApplicationResult<Identity> {
        match policy {
            AccessPolicy::Public => Ok(Identity::Anonymous),
            AccessPolicy::Master => match credential {
                Some(value) if self.master_key.matches(value) => Ok(Identity::Master),
                Some(_) => Err(ApplicationError::unauthorized("master access only")),
                None => Err(ApplicationError::unauthorized("missing credential")),
            },
            AccessPolicy::User { roles } => {
                let identity = self.identify(credential).await?;
                ensure_role(identity, roles)
            }
        }
    }
}

fn ensure_role(identity: Identity, roles: &[Role]) -> ApplicationResult<Identity> {
    match identity {
        Identity::Anonymous => Err(ApplicationError::unauthorized("missing credential")),
        Identity::Master => Ok(identity),
        Identity::User { role, .. } if roles.contains(&role) => Ok(identity),
        Identity::User { role, .. } => Err(ApplicationError::forbidden(format!(
            "role '{role}' may not access this resource"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{AuthTokenDto, TokenClaims, TokenSubject};
    use crate::domain::user::UserId;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    struct StubTokens;

    #[async_trait]
    impl TokenManager for StubTokens {
        async fn issue(&self, _subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
            Err(ApplicationError::infrastructure("not used"))
        }

        async fn authenticate(&self, token: &str) -> ApplicationResult<TokenClaims> {
            let now = Utc::now();
            let role = match token {
                "user-token" => Role::User,
                "admin-token" => Role::Admin,
                "broken-backend" => return Err(ApplicationError::infrastructure("keystore down")),
                _ => return Err(ApplicationError::unauthorized("invalid token")),
            };
            Ok(TokenClaims {
                subject_id: UserId(5),
                role,
                issued_at: now,
                expires_at: now + Duration::hours(1),
            })
        }
    }

    fn gate() -> AuthGate {
        AuthGate::new(MasterKey::new("master").unwrap(), Arc::new(StubTokens))
    }

    #[tokio::test]
    async fn public_policy_ignores_credentials() {
        let identity = gate()
            .authorize(AccessPolicy::Public, Some("garbage"))
            .await
            .unwrap();
        assert_eq!(identity, Identity::Anonymous);
    }

    #[tokio::test]
    async fn master_policy_requires_exact_master_key() {
        let gate = gate();
        assert_eq!(
            gate.authorize(AccessPolicy::Master, Some("master")).await.unwrap(),
            Identity::Master
        );
        assert!(matches!(
            gate.authorize(AccessPolicy::Master, Some("user-token")).await,
            Err(ApplicationError::Unauthorized(_))
        ));
        assert!(matches!(
            gate.authorize(AccessPolicy::Master, None).await,
            Err(ApplicationError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn user_policy_checks_role() {
        let gate = gate();
        let policy = AccessPolicy::user(&[Role::User]);

        let identity = gate.authorize(policy, Some("user-token")).await.unwrap();
        assert_eq!(
            identity,
            Identity::User {
                id: UserId(5),
                role: Role::User
            }
        );
        assert!(matches!(
            gate.authorize(policy, Some("admin-token")).await,
            Err(ApplicationError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn user_policy_rejects_missing_or_invalid_tokens() {
        let gate = gate();
        let policy = AccessPolicy::any_user();
        assert!(matches!(
            gate.authorize(policy, None).await,
            Err(ApplicationError::Unauthorized(_))
        ));
        assert!(matches!(
            gate.authorize(policy, Some("expired")).await,
            Err(ApplicationError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn verifier_failures_surface_as_unauthorized() {
        let result = gate()
            .authorize(AccessPolicy::any_user(), Some("broken-backend"))
            .await;
        assert!(matches!(result, Err(ApplicationError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn master_key_satisfies_user_policy() {
        let identity = gate()
            .authorize(AccessPolicy::user(&[Role::User]), Some("master"))
            .await
            .unwrap();
        assert!(identity.is_master());
    }
}
