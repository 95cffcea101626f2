//! Group service facade
//!
//! One entry point per operation the transport layer exposes. Every
//! mutation follows the same shape: load the canonical group, run a pure
//! transform from `roomier-core`, bump the update stamp, save. A transform
//! error means nothing is saved, so there is no partial-failure state.

use chrono::Utc;
use roomier_core::aggregate::CollectionOp;
use roomier_core::dashboard::{self, DashboardView};
use roomier_core::{ids, Chore, Error, Expense, Group, InventoryItem, MemberRef, Prefs, Result};
use serde_json::{json, Value};
use tracing::{debug, info};

/// Service over a group store
pub struct GroupService<S> {
    store: S,
}

impl<S: crate::GroupStore> GroupService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Direct access to the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a group from a raw payload and persist it
    pub fn create_group(&self, raw: &Value) -> Result<Group> {
        let mut id = ids::group_id();
        while self.store.contains(&id) {
            id = ids::group_id();
        }

        let group = Group::create(id, raw, |code| self.store.invite_code_taken(code, None))?;
        self.store.save(group.clone())?;
        info!(group_id = %group.id, name = %group.name, "created group");
        Ok(group)
    }

    /// All groups, in creation order
    pub fn list_groups(&self) -> Vec<Group> {
        self.store.list()
    }

    pub fn get_group(&self, id: &str) -> Result<Group> {
        self.store.load(id)
    }

    /// Apply an update payload to a group and persist the result
    pub fn update_group(&self, id: &str, raw: &Value) -> Result<Group> {
        let group = self.store.load(id)?;
        let mut next =
            group.apply_update(raw, |code| self.store.invite_code_taken(code, Some(id)))?;
        next.updated_at = Utc::now();
        self.store.save(next.clone())?;
        debug!(group_id = %id, "updated group");
        Ok(next)
    }

    /// Read-only dashboard projection, recomputed per call
    pub fn dashboard(&self, id: &str) -> Result<DashboardView> {
        Ok(dashboard::project(&self.store.load(id)?))
    }

    pub fn get_prefs(&self, id: &str) -> Result<Prefs> {
        Ok(self.store.load(id)?.prefs)
    }

    /// Merge a raw preference object (the body of a prefs-only update)
    /// into the group's canonical record
    pub fn update_prefs(&self, id: &str, raw: &Value) -> Result<Prefs> {
        let next = self.update_group(id, &json!({ "prefs": raw }))?;
        Ok(next.prefs)
    }

    // ========================================
    // Nested collections
    // ========================================

    fn mutate<T>(
        &self,
        id: &str,
        f: impl FnOnce(&Group) -> Result<(Group, Option<T>)>,
    ) -> Result<(Group, Option<T>)> {
        let group = self.store.load(id)?;
        let (mut next, created) = f(&group)?;
        next.updated_at = Utc::now();
        self.store.save(next.clone())?;
        Ok((next, created))
    }

    pub fn create_chore(&self, id: &str, raw: &Value) -> Result<Chore> {
        let (_, created) = self.mutate(id, |g| g.mutate_chores(CollectionOp::Append(raw)))?;
        let chore = created.expect("append always returns the created item");
        debug!(group_id = %id, chore_id = %chore.id, "created chore");
        Ok(chore)
    }

    pub fn update_chore(&self, id: &str, chore_id: &str, raw: &Value) -> Result<Chore> {
        let (next, _) =
            self.mutate(id, |g| g.mutate_chores(CollectionOp::Patch { id: chore_id, raw }))?;
        next.chores
            .into_iter()
            .find(|c| c.id == chore_id)
            .ok_or_else(|| Error::ItemNotFound {
                kind: "chore",
                id: chore_id.to_string(),
            })
    }

    pub fn delete_chore(&self, id: &str, chore_id: &str) -> Result<()> {
        self.mutate(id, |g| g.mutate_chores(CollectionOp::Remove { id: chore_id }))?;
        debug!(group_id = %id, chore_id = %chore_id, "deleted chore");
        Ok(())
    }

    pub fn create_expense(&self, id: &str, raw: &Value) -> Result<Expense> {
        let (_, created) = self.mutate(id, |g| g.mutate_expenses(CollectionOp::Append(raw)))?;
        let expense = created.expect("append always returns the created item");
        debug!(group_id = %id, expense_id = %expense.id, "created expense");
        Ok(expense)
    }

    pub fn update_expense(&self, id: &str, expense_id: &str, raw: &Value) -> Result<Expense> {
        let (next, _) = self.mutate(id, |g| {
            g.mutate_expenses(CollectionOp::Patch { id: expense_id, raw })
        })?;
        next.expenses
            .into_iter()
            .find(|e| e.id == expense_id)
            .ok_or_else(|| Error::ItemNotFound {
                kind: "expense",
                id: expense_id.to_string(),
            })
    }

    pub fn delete_expense(&self, id: &str, expense_id: &str) -> Result<()> {
        self.mutate(id, |g| g.mutate_expenses(CollectionOp::Remove { id: expense_id }))?;
        debug!(group_id = %id, expense_id = %expense_id, "deleted expense");
        Ok(())
    }

    pub fn create_item(&self, id: &str, raw: &Value) -> Result<InventoryItem> {
        let (_, created) = self.mutate(id, |g| g.mutate_inventory(CollectionOp::Append(raw)))?;
        let item = created.expect("append always returns the created item");
        debug!(group_id = %id, item_id = %item.id, "created inventory item");
        Ok(item)
    }

    pub fn update_item(&self, id: &str, item_id: &str, raw: &Value) -> Result<InventoryItem> {
        let (next, _) = self.mutate(id, |g| {
            g.mutate_inventory(CollectionOp::Patch { id: item_id, raw })
        })?;
        next.inventory
            .into_iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| Error::ItemNotFound {
                kind: "inventory item",
                id: item_id.to_string(),
            })
    }

    pub fn delete_item(&self, id: &str, item_id: &str) -> Result<()> {
        self.mutate(id, |g| g.mutate_inventory(CollectionOp::Remove { id: item_id }))?;
        debug!(group_id = %id, item_id = %item_id, "deleted inventory item");
        Ok(())
    }

    // ========================================
    // Membership join
    // ========================================

    /// Resolve an invite code (case-insensitively) and add the member
    /// exactly once. Joining twice is never an error and never duplicates;
    /// the current group value comes back either way.
    pub fn join_by_code(&self, code: &str, member: &MemberRef) -> Result<Group> {
        if member.key().is_empty() {
            return Err(Error::Invalid("member identifier is required".to_string()));
        }

        let upper = code.trim().to_uppercase();
        let group = self
            .store
            .find_by_invite_code(&upper)
            .ok_or_else(|| Error::GroupNotFound(format!("invite code {upper}")))?;

        let (next, changed) = group.join(member);
        if !changed {
            debug!(group_id = %next.id, "join was a no-op, member already present");
            return Ok(next);
        }

        let mut next = next;
        next.updated_at = Utc::now();
        self.store.save(next.clone())?;
        info!(group_id = %next.id, "member joined group");
        Ok(next)
    }
}
