// src/infrastructure/security/claims.rs
use crate::application::{
    dto::TokenClaims,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Role, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<TokenClaims> {
    let ctx = ClaimsContext::from_facts(facts);

    let subject = ctx
        .subject
        .ok_or_else(|| ApplicationError::unauthorized("missing subject"))?;
    let role = ctx
        .role
        .ok_or_else(|| ApplicationError::unauthorized("missing role"))?;
    let issued_at = ctx
        .issued_at
        .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
    let expires_at = ctx
        .expires_at
        .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

    let subject_id =
        UserId::new(subject).map_err(|_| ApplicationError::unauthorized("invalid subject"))?;

    Ok(TokenClaims {
        subject_id,
        role,
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
    })
}

#[derive(Default)]
struct ClaimsContext {
    subject: Option<i64>,
    role: Option<Role>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply_predicate(&fact.predicate);
        }
        ctx
    }

    fn apply_predicate(&mut self, predicate: &Predicate) {
        match (predicate.name.as_str(), predicate.terms.first()) {
            ("subject", Some(Term::Integer(id))) => self.subject = Some(*id),
            ("role", Some(Term::Str(name))) => self.role = name.parse().ok(),
            ("issued_at", Some(Term::Date(seconds))) => {
                self.issued_at = Some(UNIX_EPOCH + Duration::from_secs(*seconds));
            }
            ("expires_at", Some(Term::Date(seconds))) => {
                self.expires_at = Some(UNIX_EPOCH + Duration::from_secs(*seconds));
            }
            _ => {}
        }
    }
}
