//! # Roomier Core Library
//!
//! Canonical domain model for shared-household groups:
//! - Group aggregate (membership, preferences, component flags)
//! - Preference normalization over heterogeneous client payload shapes
//! - Nested collection management (chores, expenses, inventory)
//! - Dashboard projection with derived counts/sums
//! - Short URL-safe identifier allocation
//!
//! Everything here is a pure transform over a `Group` value. Loading and
//! saving canonical state is the job of a persistence collaborator (see
//! the `roomier-store` crate); transport and auth live outside both.

pub mod aggregate;
pub mod collection;
pub mod dashboard;
pub mod error;
pub mod ids;
pub mod model;
pub mod prefs;
pub mod value;

pub use error::{Error, Result};
pub use model::{Chore, Components, Expense, Group, InventoryItem, MemberRef, Prefs};
