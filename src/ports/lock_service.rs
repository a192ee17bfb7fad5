//! Lock service port.
//!
//! Advisory locking of Data records, provided by the host system. Editing a
//! draft that is linked to existing Data locks that Data for the editor;
//! the lock is released on cancel or on a successful save-to-data.
//!
//! The lock's internal guarantees (expiry, re-entrancy) belong to the
//! collaborator.

use crate::domain::foundation::{DataId, DomainError, UserId};
use async_trait::async_trait;

/// Port for the advisory lock collaborator.
#[async_trait]
pub trait LockService: Send + Sync {
    /// Acquire the lock on a Data record for the given user.
    ///
    /// # Errors
    ///
    /// - `Locked` if another user holds the lock
    async fn lock(&self, data_id: &DataId, user_id: &UserId) -> Result<(), DomainError>;

    /// Release the lock held by the given user.
    ///
    /// Releasing a lock that is not held is not an error.
    async fn unlock(&self, data_id: &DataId, user_id: &UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_service_is_object_safe() {
        fn _accepts_dyn(_locks: &dyn LockService) {}
    }
}
