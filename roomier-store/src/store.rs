//! Group persistence collaborator
//!
//! The core operates on canonical `Group` values and expects a collaborator
//! that can load them before and save them after each pure transform. This
//! module defines that interface and an in-memory implementation suitable
//! for tests and single-process use; a persistent backend slots in behind
//! the same trait without touching the core's logic.

use std::collections::HashMap;
use std::sync::RwLock;

use roomier_core::aggregate::CollectionOp;
use roomier_core::{Error, Group, Result};
use serde_json::json;

/// Storage interface for canonical group state.
///
/// `save` is a full replace of the group's state. Implementations must
/// allow at most one committed writer per group mutation at a time; the
/// in-memory store does so with a single lock.
pub trait GroupStore: Send + Sync {
    /// Load the canonical value for a group id
    fn load(&self, id: &str) -> Result<Group>;

    /// Persist a group, replacing any previous value under its id
    fn save(&self, group: Group) -> Result<()>;

    /// True when a group with this id exists
    fn contains(&self, id: &str) -> bool;

    /// All groups in insertion order
    fn list(&self) -> Vec<Group>;

    /// Find the group holding an invite code (codes are stored upper-cased,
    /// so callers pass an upper-cased input)
    fn find_by_invite_code(&self, code: &str) -> Option<Group>;

    /// True when any group other than `exclude` holds this invite code
    fn invite_code_taken(&self, code: &str, exclude: Option<&str>) -> bool;
}

#[derive(Default)]
struct Shelf {
    groups: HashMap<String, Group>,
    order: Vec<String>,
}

/// In-memory group store
#[derive(Default)]
pub struct MemoryStore {
    shelf: RwLock<Shelf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with one demo household, handy for tests
    /// and examples: two roommates, two chores, one expense, two
    /// inventory items, invite code `T38Y2Z`.
    pub fn seeded() -> Self {
        let store = Self::new();

        let group = Group::create(
            "g1".to_string(),
            &json!({
                "name": "Address House",
                "description": "Shared place near campus.",
                "inviteCode": "T38Y2Z",
                "roommates": ["alex@gmail.com", "sam@gmail.com"]
            }),
            |_| false,
        )
        .and_then(|g| {
            let (g, _) = g.mutate_chores(CollectionOp::Append(&json!({
                "title": "Trash", "due": "2025-11-08",
                "assignee": "alex@gmail.com", "description": "Take out"
            })))?;
            let (g, _) = g.mutate_chores(CollectionOp::Append(&json!({
                "title": "Dishes", "due": "2025-11-07",
                "assignee": "sam@gmail.com", "description": "Clean up after party"
            })))?;
            let (g, _) = g.mutate_expenses(CollectionOp::Append(&json!({
                "description": "Paper towels", "amount": 7.5,
                "paidBy": {"email": "alex@gmail.com"}, "youOwe": true
            })))?;
            let (g, _) =
                g.mutate_inventory(CollectionOp::Append(&json!({"name": "Milk", "status": "Low"})))?;
            let (g, _) = g.mutate_inventory(CollectionOp::Append(
                &json!({"name": "Dish Soap", "status": "Good"}),
            ))?;
            Ok(g)
        })
        .expect("seed data is statically valid");

        store.save(group).expect("seed save cannot fail");
        store
    }
}

impl GroupStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Group> {
        self.shelf
            .read()
            .unwrap()
            .groups
            .get(id)
            .cloned()
            .ok_or_else(|| Error::GroupNotFound(id.to_string()))
    }

    fn save(&self, group: Group) -> Result<()> {
        let mut shelf = self.shelf.write().unwrap();
        if !shelf.groups.contains_key(&group.id) {
            shelf.order.push(group.id.clone());
        }
        shelf.groups.insert(group.id.clone(), group);
        Ok(())
    }

    fn contains(&self, id: &str) -> bool {
        self.shelf.read().unwrap().groups.contains_key(id)
    }

    fn list(&self) -> Vec<Group> {
        let shelf = self.shelf.read().unwrap();
        shelf
            .order
            .iter()
            .filter_map(|id| shelf.groups.get(id).cloned())
            .collect()
    }

    fn find_by_invite_code(&self, code: &str) -> Option<Group> {
        self.shelf
            .read()
            .unwrap()
            .groups
            .values()
            .find(|g| g.invite_code == code)
            .cloned()
    }

    fn invite_code_taken(&self, code: &str, exclude: Option<&str>) -> bool {
        self.shelf
            .read()
            .unwrap()
            .groups
            .values()
            .any(|g| g.invite_code == code && Some(g.id.as_str()) != exclude)
    }
}
