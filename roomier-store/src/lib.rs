//! # Roomier Store
//!
//! Persistence collaborator and service facade over `roomier-core`:
//! - `GroupStore` trait: `load`/`save` plus the invite-code lookups the
//!   join resolver and code-uniqueness checks need
//! - `MemoryStore`: RwLock-guarded in-memory implementation
//! - `GroupService`: load → pure transform → save for every operation,
//!   so either the whole mutation lands or none of it does
//!
//! The store guarantees at most one committed writer per group mutation;
//! the core's pure transforms assume that guarantee and never lock.

pub mod service;
pub mod store;

pub use service::GroupService;
pub use store::{GroupStore, MemoryStore};
