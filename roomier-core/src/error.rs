//! Common error types for Roomier

use thiserror::Error;

/// Common result type for Roomier operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by group and nested-collection operations
///
/// Group-level and item-level lookups fail with distinct variants so a
/// caller can render "group not found" and "item not found" differently.
/// Normalization never produces an error; it degrades to defaults.
#[derive(Error, Debug)]
pub enum Error {
    /// No group exists with the given id (or invite code, for joins)
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// A nested collection has no item with the given id
    #[error("{kind} not found: {id}")]
    ItemNotFound { kind: &'static str, id: String },

    /// Invite code already held by another group
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A required field is missing or empty after normalization
    #[error("Invalid input: {0}")]
    Invalid(String),
}

impl Error {
    /// True when the error is either NotFound kind
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::GroupNotFound(_) | Error::ItemNotFound { .. })
    }
}
