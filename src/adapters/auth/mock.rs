//! Mock implementation of the TokenValidator port.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::TokenValidator;

/// Mock validator mapping fixed tokens to users.
#[derive(Default)]
pub struct MockTokenValidator {
    users: HashMap<String, AuthenticatedUser>,
}

impl MockTokenValidator {
    /// Creates a validator that rejects every token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for a user.
    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.users.insert(token.into(), user);
        self
    }
}

#[async_trait]
impl TokenValidator for MockTokenValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.users
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
