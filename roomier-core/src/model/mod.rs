//! Canonical domain types
//!
//! The single normalized shape of a group and its owned sub-entities, as
//! opposed to the various shapes accepted from clients (see `crate::prefs`
//! for the accepted-shape handling).

mod chore;
mod expense;
mod group;
mod inventory;
mod member;

pub use chore::{Chore, Repeat};
pub use expense::Expense;
pub use group::{Components, Group, Prefs};
pub use inventory::{InventoryItem, ItemStatus};
pub use member::MemberRef;
