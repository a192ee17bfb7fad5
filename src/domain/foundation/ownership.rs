//! Ownership trait for user-owned records.
//!
//! A record's `user` field is its ownership marker. Implementing this trait
//! gives the access-control gate a uniform way to compare that marker with
//! the acting user.

use super::UserId;

/// Trait for records that have a single owning user.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this record.
    fn owner_id(&self) -> &UserId;

    /// Returns `true` if `user_id` matches `owner_id()`.
    fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRecord {
        owner: UserId,
    }

    impl OwnedByUser for TestRecord {
        fn owner_id(&self) -> &UserId {
            &self.owner
        }
    }

    #[test]
    fn is_owned_by_returns_true_for_owner() {
        let owner = UserId::new("owner-123").unwrap();
        let record = TestRecord {
            owner: owner.clone(),
        };
        assert!(record.is_owned_by(&owner));
    }

    #[test]
    fn is_owned_by_returns_false_for_non_owner() {
        let record = TestRecord {
            owner: UserId::new("owner-123").unwrap(),
        };
        let other = UserId::new("other-456").unwrap();
        assert!(!record.is_owned_by(&other));
    }
}
