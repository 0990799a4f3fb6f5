// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Role, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Builds the acting user from the authority facts of a verified token.
///
/// Capabilities come from the role alone; the identity service's own grants
/// do not widen what a role may do here.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let ctx = ClaimsContext::from_facts(facts);

    let user_id = ctx
        .user_id
        .ok_or_else(|| ApplicationError::unauthorized("missing user id"))?;
    let username = ctx
        .username
        .ok_or_else(|| ApplicationError::unauthorized("missing username"))?;
    let role = ctx
        .role
        .ok_or_else(|| ApplicationError::unauthorized("missing role"))?;
    let issued_at = ctx
        .issued_at
        .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
    let expires_at = ctx
        .expires_at
        .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

    let id = UserId::new(user_id)
        .map_err(|_| ApplicationError::unauthorized("invalid user id"))?;

    Ok(AuthenticatedUser {
        id,
        username,
        role,
        capabilities: role.default_capabilities(),
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
    })
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<i64>,
    username: Option<String>,
    role: Option<Role>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply(fact.predicate);
        }
        ctx
    }

    fn apply(&mut self, predicate: Predicate) {
        let mut terms = predicate.terms.into_iter();
        match predicate.name.as_str() {
            "user" => {
                if let (Some(Term::Integer(id)), Some(Term::Str(name))) = (terms.next(), terms.next())
                {
                    self.user_id = Some(id);
                    self.username = Some(name);
                }
            }
            "role" => {
                if let Some(Term::Str(name)) = terms.next() {
                    self.role = name.parse().ok();
                }
            }
            "issued_at" => {
                if let Some(Term::Date(seconds)) = terms.next() {
                    self.issued_at = Some(UNIX_EPOCH + Duration::from_secs(seconds));
                }
            }
            "expires_at" => {
                if let Some(Term::Date(seconds)) = terms.next() {
                    self.expires_at = Some(UNIX_EPOCH + Duration::from_secs(seconds));
                }
            }
            _ => {}
        }
    }
}
