use crate::domain::user::{Role, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthTokenDto {
    pub token: String,
    #[serde(with = "serde_time")]
    pub issued_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

/// Who is making the request, as classified by the access gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    User {
        id: UserId,
        role: Role,
    },
    Master,
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    pub fn is_master(&self) -> bool {
        matches!(self, Identity::Master)
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Identity::User { id, .. } => Some(*id),
            Identity::Anonymous | Identity::Master => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub subject_id: UserId,
    pub role: Role,
}

impl TokenSubject {
    pub fn new(subject_id: UserId, role: Role) -> Self {
        Self { subject_id, role }
    }
}

/// Verified content of a signed token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub subject_id: UserId,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<&TokenClaims> for Identity {
    fn from(claims: &TokenClaims) -> Self {
        Identity::User {
            id: claims.subject_id,
            role: claims.role,
        }
    }
}
