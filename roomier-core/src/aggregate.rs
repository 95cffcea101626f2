//! Group aggregate operations
//!
//! All mutation of a group's canonical state passes through here as pure
//! transforms: each operation takes a `Group` (or creation payload) and
//! returns the next canonical value, or an error with no change. Loading
//! before and saving after is the persistence collaborator's job, and so
//! is invite-code bookkeeping across groups: operations that resolve a
//! code take a `code_taken` predicate instead of reaching into storage.

use chrono::Utc;
use serde_json::Value;

use crate::collection::{self, NestedItem};
use crate::error::{Error, Result};
use crate::ids;
use crate::model::{Chore, Components, Expense, Group, InventoryItem, MemberRef, Prefs};
use crate::prefs::{normalize_components, normalize_prefs};
use crate::value::{is_null, member_list, str_field, trimmed_field};

/// An operation routed to one of the three nested collections
#[derive(Debug, Clone)]
pub enum CollectionOp<'a> {
    /// Create a new item from a raw payload
    Append(&'a Value),
    /// Overwrite the fields present in the patch on the item with this id
    Patch { id: &'a str, raw: &'a Value },
    /// Delete the item with this id
    Remove { id: &'a str },
}

fn run_op<T: NestedItem>(items: &[T], op: &CollectionOp<'_>) -> Result<(Vec<T>, Option<T>)> {
    match op {
        CollectionOp::Append(raw) => {
            let (next, created) = collection::append(items, raw)?;
            Ok((next, Some(created)))
        }
        CollectionOp::Patch { id, raw } => Ok((collection::patch(items, id, raw)?, None)),
        CollectionOp::Remove { id } => Ok((collection::remove(items, id)?, None)),
    }
}

impl Group {
    /// Create a new group from a raw payload.
    ///
    /// The caller allocates the id (and checks it against its population);
    /// preferences and components are normalized over the documented
    /// defaults; all three nested collections start empty regardless of
    /// what `components` declares. A supplied invite code is upper-cased
    /// and fails with `Conflict` when `code_taken` says another group
    /// already holds it; an absent code is generated fresh.
    pub fn create(id: String, raw: &Value, code_taken: impl Fn(&str) -> bool) -> Result<Group> {
        let invite_code = match trimmed_field(raw, "inviteCode") {
            Some(code) => {
                let upper = code.to_uppercase();
                if code_taken(&upper) {
                    return Err(Error::Conflict(format!(
                        "invite code {upper} is already in use"
                    )));
                }
                upper
            }
            None => fresh_code(&code_taken),
        };

        let now = Utc::now();
        Ok(Group {
            id,
            name: trimmed_field(raw, "name").unwrap_or("New Group").to_string(),
            description: str_field(raw, "description").unwrap_or_default().to_string(),
            photo_url: str_field(raw, "photoUrl")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            invite_code,
            roommates: member_list(raw, "roommates").unwrap_or_default(),
            members: member_list(raw, "members").unwrap_or_default(),
            components: normalize_components(&Components::default(), raw.get("components")),
            prefs: normalize_prefs(&Prefs::default(), raw),
            chores: Vec::new(),
            expenses: Vec::new(),
            inventory: Vec::new(),
            created_by: raw.get("createdBy").and_then(MemberRef::from_value),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply an update payload, returning the next canonical value.
    ///
    /// Preference-bearing keys go through the normalizer (merge path); the
    /// remaining top-level fields shallow-merge when present. `inviteCode`
    /// is upper-cased before storage; `null` clears a custom code by
    /// regenerating a fresh one, since the field can never be empty at
    /// rest. Changing the code does not retroactively touch anything; an
    /// old code simply stops resolving.
    pub fn apply_update(&self, raw: &Value, code_taken: impl Fn(&str) -> bool) -> Result<Group> {
        let mut out = self.clone();
        out.prefs = normalize_prefs(&self.prefs, raw);
        out.components = normalize_components(&self.components, raw.get("components"));

        if let Some(name) = trimmed_field(raw, "name") {
            out.name = name.to_string();
        }
        if let Some(description) = str_field(raw, "description") {
            out.description = description.to_string();
        } else if is_null(raw, "description") {
            out.description.clear();
        }
        match raw.get("photoUrl") {
            Some(Value::String(url)) => out.photo_url = Some(url.clone()),
            Some(Value::Null) => out.photo_url = None,
            _ => {}
        }

        match raw.get("inviteCode") {
            Some(Value::String(code)) if !code.trim().is_empty() => {
                let upper = code.trim().to_uppercase();
                if upper != self.invite_code && code_taken(&upper) {
                    return Err(Error::Conflict(format!(
                        "invite code {upper} is already in use"
                    )));
                }
                out.invite_code = upper;
            }
            Some(Value::Null) => out.invite_code = fresh_code(&code_taken),
            _ => {}
        }

        if let Some(roommates) = member_list(raw, "roommates") {
            out.roommates = roommates;
        }
        if let Some(members) = member_list(raw, "members") {
            out.members = members;
        }

        Ok(out)
    }

    /// Route an operation to the chores collection
    pub fn mutate_chores(&self, op: CollectionOp<'_>) -> Result<(Group, Option<Chore>)> {
        let (chores, created) = run_op(&self.chores, &op)?;
        let mut out = self.clone();
        out.chores = chores;
        Ok((out, created))
    }

    /// Route an operation to the expenses collection
    pub fn mutate_expenses(&self, op: CollectionOp<'_>) -> Result<(Group, Option<Expense>)> {
        let (expenses, created) = run_op(&self.expenses, &op)?;
        let mut out = self.clone();
        out.expenses = expenses;
        Ok((out, created))
    }

    /// Route an operation to the inventory collection
    pub fn mutate_inventory(&self, op: CollectionOp<'_>) -> Result<(Group, Option<InventoryItem>)> {
        let (inventory, created) = run_op(&self.inventory, &op)?;
        let mut out = self.clone();
        out.inventory = inventory;
        Ok((out, created))
    }

    /// Idempotent membership join.
    ///
    /// Returns the next value and whether anything changed. A member
    /// already present in the membership list (matched case-insensitively
    /// by identifier/email) leaves the group untouched; otherwise the
    /// member is appended to the membership list and, when absent there by
    /// the same rule, to the roommates display list. Members without a
    /// usable identity key never join (they could never be matched again).
    pub fn join(&self, member: &MemberRef) -> (Group, bool) {
        if member.key().is_empty()
            || self.members.iter().any(|m| m.same_member(member))
        {
            return (self.clone(), false);
        }

        let mut out = self.clone();
        out.members.push(member.clone());
        if !out.roommates.iter().any(|m| m.same_member(member)) {
            out.roommates.push(member.clone());
        }
        (out, true)
    }
}

fn fresh_code(code_taken: &impl Fn(&str) -> bool) -> String {
    let mut code = ids::invite_code();
    while code_taken(&code) {
        code = ids::invite_code();
    }
    code
}
