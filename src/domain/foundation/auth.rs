//! Authentication types for the domain layer.
//!
//! These types represent the actor behind a request. They have no provider
//! dependencies: any token validator can populate them via the
//! `TokenValidator` port.
//!
//! # Design
//!
//! The access-control gate needs to reason about anonymous callers, so the
//! request actor is modeled as `RequestUser` with an explicit `Anonymous`
//! variant rather than an `Option` threaded through every signature.

use super::UserId;
use thiserror::Error;

/// Permission codename required for the curation workflow surface.
pub const CURATE_ACCESS: &str = "curate_access";

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// Whether the user holds superuser rights in the host system.
    pub is_superuser: bool,

    /// Permission codenames granted through the user's group memberships.
    pub permissions: Vec<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, is_superuser: bool, permissions: Vec<String>) -> Self {
        Self {
            id,
            is_superuser,
            permissions,
        }
    }

    /// Returns true if the user holds the given permission codename.
    ///
    /// Superusers hold every permission implicitly.
    pub fn has_permission(&self, codename: &str) -> bool {
        self.is_superuser || self.permissions.iter().any(|p| p == codename)
    }
}

/// The actor behind a request: anonymous, or an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestUser {
    /// No valid credentials were presented.
    Anonymous,
    /// A validated user.
    Authenticated(AuthenticatedUser),
}

impl RequestUser {
    /// Wraps an authenticated user.
    pub fn authenticated(user: AuthenticatedUser) -> Self {
        RequestUser::Authenticated(user)
    }

    /// Returns true if no user is attached to the request.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, RequestUser::Anonymous)
    }

    /// Returns true if the actor is a superuser.
    pub fn is_superuser(&self) -> bool {
        matches!(self, RequestUser::Authenticated(u) if u.is_superuser)
    }

    /// Returns the authenticated user, if any.
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            RequestUser::Anonymous => None,
            RequestUser::Authenticated(u) => Some(u),
        }
    }

    /// Returns the acting user's id, if authenticated.
    pub fn id(&self) -> Option<&UserId> {
        self.user().map(|u| &u.id)
    }
}

impl From<AuthenticatedUser> for RequestUser {
    fn from(user: AuthenticatedUser) -> Self {
        RequestUser::Authenticated(user)
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, superuser: bool, permissions: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new(id).unwrap(),
            superuser,
            permissions.iter().map(|p| p.to_string()).collect(),
        )
    }

    #[test]
    fn has_permission_matches_granted_codename() {
        let u = user("1", false, &[CURATE_ACCESS]);
        assert!(u.has_permission(CURATE_ACCESS));
        assert!(!u.has_permission("other_access"));
    }

    #[test]
    fn superuser_holds_every_permission() {
        let u = user("1", true, &[]);
        assert!(u.has_permission(CURATE_ACCESS));
        assert!(u.has_permission("anything"));
    }

    #[test]
    fn anonymous_request_user_has_no_id() {
        let actor = RequestUser::Anonymous;
        assert!(actor.is_anonymous());
        assert!(!actor.is_superuser());
        assert!(actor.id().is_none());
    }

    #[test]
    fn authenticated_request_user_exposes_id() {
        let actor = RequestUser::authenticated(user("42", false, &[]));
        assert!(!actor.is_anonymous());
        assert_eq!(actor.id().unwrap().as_str(), "42");
    }

    #[test]
    fn is_superuser_reflects_flag() {
        assert!(RequestUser::authenticated(user("1", true, &[])).is_superuser());
        assert!(!RequestUser::authenticated(user("1", false, &[])).is_superuser());
    }
}
