//! Ownership and access-control gate.
//!
//! Every draft operation passes through one of these checks before touching
//! state. The rules:
//!
//! - anonymous actors are always rejected
//! - superusers bypass every ownership check
//! - otherwise, only a record's owner may read, write, delete, or reassign it
//!
//! The checks are explicit functions taking `(user, record)` and returning
//! `Result<(), AccessControlError>`; they never mutate anything, and every
//! denial carries a human-readable message. The HTTP layer maps
//! `AccessControlError` to 403 without exception.

use crate::domain::foundation::{AccessControlError, OwnedByUser, RequestUser};

/// Check that the user may read a single record.
///
/// # Errors
///
/// - `AccessControlError` if the user is anonymous, or neither superuser nor
///   owner
pub fn check_can_read<T: OwnedByUser>(
    user: &RequestUser,
    record: &T,
) -> Result<(), AccessControlError> {
    let acting = authenticated(user)?;
    if acting.is_superuser {
        return Ok(());
    }
    if record.is_owned_by(&acting.id) {
        return Ok(());
    }
    Err(AccessControlError::new(
        "The user doesn't have enough rights.",
    ))
}

/// Check that the user may read every record in a result set.
///
/// This is deliberately fail-closed and non-filtering: the first record not
/// owned by the user rejects the whole set. Callers get all or nothing.
pub fn check_can_read_all<T: OwnedByUser>(
    user: &RequestUser,
    records: &[T],
) -> Result<(), AccessControlError> {
    let acting = authenticated(user)?;
    if acting.is_superuser {
        return Ok(());
    }
    for record in records {
        if !record.is_owned_by(&acting.id) {
            return Err(AccessControlError::new(
                "The user doesn't have enough rights.",
            ));
        }
    }
    Ok(())
}

/// Check that the user may write (create, modify, delete) a record.
///
/// # Errors
///
/// - `AccessControlError` if the user is anonymous, or neither superuser nor
///   owner
pub fn check_can_write<T: OwnedByUser>(
    user: &RequestUser,
    record: &T,
) -> Result<(), AccessControlError> {
    let acting = authenticated(user)?;
    if acting.is_superuser {
        return Ok(());
    }
    if record.is_owned_by(&acting.id) {
        return Ok(());
    }
    Err(AccessControlError::insufficient_rights())
}

/// Check that the user may reassign a record's owner.
///
/// Superusers may reassign anything; an owner may transfer ownership to
/// anyone, including back to themselves.
pub fn check_can_change_owner<T: OwnedByUser>(
    user: &RequestUser,
    record: &T,
) -> Result<(), AccessControlError> {
    let acting = authenticated(user)?;
    if acting.is_superuser {
        return Ok(());
    }
    if record.is_owned_by(&acting.id) {
        return Ok(());
    }
    Err(AccessControlError::insufficient_rights())
}

/// Check that the user is a superuser (administrative operations).
pub fn check_superuser(user: &RequestUser) -> Result<(), AccessControlError> {
    let acting = authenticated(user)?;
    if acting.is_superuser {
        return Ok(());
    }
    Err(AccessControlError::new(
        "Only administrators can perform this operation.",
    ))
}

/// Check that the user holds a permission codename.
///
/// The workflow surface is gated on [`crate::domain::foundation::CURATE_ACCESS`];
/// superusers hold every permission implicitly.
pub fn check_permission(user: &RequestUser, codename: &str) -> Result<(), AccessControlError> {
    let acting = authenticated(user)?;
    if acting.has_permission(codename) {
        return Ok(());
    }
    Err(AccessControlError::new(format!(
        "The user doesn't have the '{}' permission.",
        codename
    )))
}

/// Reject anonymous actors before any other rule runs.
fn authenticated(
    user: &RequestUser,
) -> Result<&crate::domain::foundation::AuthenticatedUser, AccessControlError> {
    user.user().ok_or_else(AccessControlError::insufficient_rights)
}
