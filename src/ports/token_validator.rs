//! Token validator port.
//!
//! Keeps the HTTP middleware provider-agnostic: whether tokens come from a
//! local JWT secret or an external identity provider, the middleware only
//! sees this trait.

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use async_trait::async_trait;

/// Port for validating bearer tokens.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Validate a token and return the authenticated user it represents.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
