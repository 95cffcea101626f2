//! Nested collection management
//!
//! Generic create/update/delete-by-id over the ordered collections a group
//! owns (chores, expenses, inventory). All operations are pure: they take a
//! slice and return a new collection, leaving ownership of the canonical
//! state with the Group aggregate. Insertion order is the canonical
//! iteration order; nothing here sorts.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::ids;
use crate::model::{Chore, Expense, InventoryItem, ItemStatus, MemberRef, Repeat};
use crate::value::{bool_field, f64_field, is_null, str_field, trimmed_field};

/// An item embedded in a group-owned ordered collection
pub trait NestedItem: Clone {
    /// Kind name used in error messages and logging
    const KIND: &'static str;

    /// Stable id, unique within the parent collection
    fn id(&self) -> &str;

    /// Construct from a raw payload, applying per-kind defaults.
    /// Fails with `Invalid` only for the kind's required fields.
    fn build(id: String, raw: &Value) -> Result<Self>;

    /// Overwrite the fields present in `patch`; unknown fields are ignored
    /// and malformed values leave the existing field untouched.
    fn apply_patch(&mut self, patch: &Value);
}

/// Append a new item built from `raw`, assigning a fresh id.
///
/// Returns the updated collection and the created item (including its id).
pub fn append<T: NestedItem>(items: &[T], raw: &Value) -> Result<(Vec<T>, T)> {
    let mut id = ids::item_id();
    while items.iter().any(|item| item.id() == id) {
        id = ids::item_id();
    }

    let created = T::build(id, raw)?;
    let mut out = items.to_vec();
    out.push(created.clone());
    Ok((out, created))
}

/// Overwrite the fields present in `patch` on the item with the given id
pub fn patch<T: NestedItem>(items: &[T], id: &str, raw: &Value) -> Result<Vec<T>> {
    let mut out = items.to_vec();
    let item = out
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| Error::ItemNotFound {
            kind: T::KIND,
            id: id.to_string(),
        })?;
    item.apply_patch(raw);
    Ok(out)
}

/// Remove the item with the given id, preserving relative order
pub fn remove<T: NestedItem>(items: &[T], id: &str) -> Result<Vec<T>> {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| Error::ItemNotFound {
            kind: T::KIND,
            id: id.to_string(),
        })?;
    let mut out = items.to_vec();
    out.remove(index);
    Ok(out)
}

/// Date field accepting `YYYY-MM-DD` or a full RFC 3339 timestamp
fn date_field(raw: &Value, key: &str) -> Option<NaiveDate> {
    let s = str_field(raw, key)?.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

fn member_field(raw: &Value, key: &str) -> Option<MemberRef> {
    raw.get(key).and_then(MemberRef::from_value)
}

fn enum_field<E: serde::de::DeserializeOwned>(raw: &Value, key: &str) -> Option<E> {
    raw.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

impl NestedItem for Chore {
    const KIND: &'static str = "chore";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, raw: &Value) -> Result<Self> {
        let title = trimmed_field(raw, "title")
            .ok_or_else(|| Error::Invalid("chore title is required".to_string()))?;

        Ok(Chore {
            id,
            title: title.to_string(),
            due: date_field(raw, "due"),
            assignee: member_field(raw, "assignee"),
            repeat: enum_field(raw, "repeat").unwrap_or_default(),
            description: str_field(raw, "description").unwrap_or_default().to_string(),
            done: bool_field(raw, "done").unwrap_or(false),
        })
    }

    fn apply_patch(&mut self, patch: &Value) {
        if let Some(title) = trimmed_field(patch, "title") {
            self.title = title.to_string();
        }
        if let Some(due) = date_field(patch, "due") {
            self.due = Some(due);
        } else if is_null(patch, "due") {
            self.due = None;
        }
        if let Some(assignee) = member_field(patch, "assignee") {
            self.assignee = Some(assignee);
        } else if is_null(patch, "assignee") {
            self.assignee = None;
        }
        if let Some(repeat) = enum_field::<Repeat>(patch, "repeat") {
            self.repeat = repeat;
        }
        if let Some(description) = str_field(patch, "description") {
            self.description = description.to_string();
        }
        if let Some(done) = bool_field(patch, "done") {
            self.done = done;
        }
    }
}

impl NestedItem for Expense {
    const KIND: &'static str = "expense";

    fn build(id: String, raw: &Value) -> Result<Self> {
        let description = trimmed_field(raw, "description")
            .ok_or_else(|| Error::Invalid("expense description is required".to_string()))?;

        let amount = f64_field(raw, "amount").unwrap_or(0.0);
        if amount < 0.0 {
            return Err(Error::Invalid("expense amount cannot be negative".to_string()));
        }

        Ok(Expense {
            id,
            description: description.to_string(),
            amount,
            paid_by: member_field(raw, "paidBy"),
            you_owe: bool_field(raw, "youOwe").unwrap_or(false),
            created_at: Utc::now(),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: &Value) {
        if let Some(description) = trimmed_field(patch, "description") {
            self.description = description.to_string();
        }
        // Negative amounts degrade to no-change on patch; creation rejects them
        if let Some(amount) = f64_field(patch, "amount").filter(|a| *a >= 0.0) {
            self.amount = amount;
        }
        if let Some(paid_by) = member_field(patch, "paidBy") {
            self.paid_by = Some(paid_by);
        } else if is_null(patch, "paidBy") {
            self.paid_by = None;
        }
        if let Some(you_owe) = bool_field(patch, "youOwe") {
            self.you_owe = you_owe;
        }
        // createdAt is set once at creation and never patched
    }
}

impl NestedItem for InventoryItem {
    const KIND: &'static str = "inventory item";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, raw: &Value) -> Result<Self> {
        let name = trimmed_field(raw, "name")
            .ok_or_else(|| Error::Invalid("item name is required".to_string()))?;

        Ok(InventoryItem {
            id,
            name: name.to_string(),
            status: enum_field(raw, "status").unwrap_or_default(),
            info: trimmed_field(raw, "info")
                .or_else(|| trimmed_field(raw, "description"))
                .map(str::to_string),
        })
    }

    fn apply_patch(&mut self, patch: &Value) {
        if let Some(name) = trimmed_field(patch, "name") {
            self.name = name.to_string();
        }
        if let Some(status) = enum_field::<ItemStatus>(patch, "status") {
            self.status = status;
        }
        if let Some(info) = trimmed_field(patch, "info")
            .or_else(|| trimmed_field(patch, "description"))
        {
            self.info = Some(info.to_string());
        } else if is_null(patch, "info") || is_null(patch, "description") {
            self.info = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_assigns_distinct_ids_in_order() {
        let mut chores: Vec<Chore> = Vec::new();
        for i in 0..10 {
            let (next, created) =
                append(&chores, &json!({"title": format!("Chore {i}")})).unwrap();
            assert!(!created.id.is_empty());
            chores = next;
        }

        assert_eq!(chores.len(), 10);
        let ids: std::collections::HashSet<&str> =
            chores.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 10);
        for (i, chore) in chores.iter().enumerate() {
            assert_eq!(chore.title, format!("Chore {i}"));
        }
    }

    #[test]
    fn test_scenario_b_chore_defaults() {
        let (chores, created) = append::<Chore>(
            &[],
            &json!({"title": "Trash", "due": "2025-11-08", "assignee": "a@x.com"}),
        )
        .unwrap();

        assert_eq!(chores.len(), 1);
        assert!(!created.id.is_empty());
        assert!(!created.done);
        assert_eq!(created.repeat, Repeat::None);
        assert_eq!(created.due, NaiveDate::from_ymd_opt(2025, 11, 8));
        assert_eq!(created.assignee, Some(MemberRef::Id("a@x.com".to_string())));
    }

    #[test]
    fn test_chore_requires_title() {
        let err = append::<Chore>(&[], &json!({"due": "2025-11-08"})).unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));

        let err = append::<Chore>(&[], &json!({"title": "   "})).unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));
    }

    #[test]
    fn test_patch_overwrites_only_present_fields() {
        let (chores, created) = append::<Chore>(
            &[],
            &json!({"title": "Dishes", "due": "2025-11-07", "description": "after party"}),
        )
        .unwrap();

        let patched = patch(&chores, &created.id, &json!({"done": true})).unwrap();
        assert!(patched[0].done);
        assert_eq!(patched[0].title, "Dishes");
        assert_eq!(patched[0].due, NaiveDate::from_ymd_opt(2025, 11, 7));
        assert_eq!(patched[0].description, "after party");
    }

    #[test]
    fn test_patch_null_clears_optional_fields() {
        let (chores, created) = append::<Chore>(
            &[],
            &json!({"title": "Vacuum", "due": "2025-11-07", "assignee": "sam@gmail.com"}),
        )
        .unwrap();

        let patched =
            patch(&chores, &created.id, &json!({"due": null, "assignee": null})).unwrap();
        assert!(patched[0].due.is_none());
        assert!(patched[0].assignee.is_none());
        // Required field ignores null
        let patched = patch(&patched, &created.id, &json!({"title": null})).unwrap();
        assert_eq!(patched[0].title, "Vacuum");
    }

    #[test]
    fn test_patch_ignores_unknown_fields() {
        let (items, created) =
            append::<InventoryItem>(&[], &json!({"name": "Milk", "status": "Low"})).unwrap();
        let patched = patch(&items, &created.id, &json!({"aisle": 4, "status": "Full"})).unwrap();
        assert_eq!(patched[0].status, ItemStatus::Full);
        let v = serde_json::to_value(&patched[0]).unwrap();
        assert!(v.get("aisle").is_none());
    }

    #[test]
    fn test_patch_and_remove_missing_id_leave_collection_unchanged() {
        let (chores, _) = append::<Chore>(&[], &json!({"title": "Trash"})).unwrap();

        let err = patch(&chores, "nope", &json!({"done": true})).unwrap_err();
        assert!(matches!(err, Error::ItemNotFound { kind: "chore", .. }));
        let err = remove(&chores, "nope").unwrap_err();
        assert!(matches!(err, Error::ItemNotFound { kind: "chore", .. }));

        assert_eq!(chores.len(), 1);
        assert!(!chores[0].done);
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let mut items: Vec<InventoryItem> = Vec::new();
        for name in ["Milk", "Soap", "Rice", "Salt"] {
            let (next, _) = append(&items, &json!({"name": name})).unwrap();
            items = next;
        }

        let removed = remove(&items, items[1].id()).unwrap();
        let names: Vec<&str> = removed.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Rice", "Salt"]);
    }

    #[test]
    fn test_expense_defaults_and_negative_amount() {
        let (_, created) =
            append::<Expense>(&[], &json!({"description": "Paper towels"})).unwrap();
        assert_eq!(created.amount, 0.0);
        assert!(!created.you_owe);

        let err =
            append::<Expense>(&[], &json!({"description": "Rent", "amount": -5})).unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));
    }

    #[test]
    fn test_expense_created_at_immutable() {
        let (expenses, created) = append::<Expense>(
            &[],
            &json!({"description": "Rent", "amount": 800, "youOwe": true}),
        )
        .unwrap();

        let patched = patch(
            &expenses,
            &created.id,
            &json!({"amount": 850, "createdAt": "1999-01-01T00:00:00Z"}),
        )
        .unwrap();
        assert_eq!(patched[0].amount, 850.0);
        assert_eq!(patched[0].created_at, created.created_at);
    }

    #[test]
    fn test_inventory_accepts_description_for_info() {
        let (_, created) =
            append::<InventoryItem>(&[], &json!({"name": "Soap", "description": "dish soap"}))
                .unwrap();
        assert_eq!(created.info.as_deref(), Some("dish soap"));
    }
}
