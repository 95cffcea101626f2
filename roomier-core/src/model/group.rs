//! Group aggregate root and its preference/component records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::chore::Chore;
use super::expense::Expense;
use super::inventory::InventoryItem;
use super::member::MemberRef;

/// Which sub-ledgers are active for a group
///
/// Always exactly the three known keys; unknown keys supplied by a caller
/// are dropped during normalization. Disabling a component only affects
/// exposure at the transport layer, not the underlying collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Components {
    pub chores: bool,
    pub expenses: bool,
    pub inventory: bool,
}

impl Default for Components {
    fn default() -> Self {
        Self {
            chores: true,
            expenses: true,
            inventory: true,
        }
    }
}

/// Canonical preference record
///
/// Quiet hours are HH:MM 24-hour strings, temperature is integer
/// Fahrenheit, and `accommodations` is either the `"None"` sentinel or a
/// non-empty free-text string (never empty at rest).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prefs {
    pub quiet_start: String,
    pub quiet_end: String,
    pub temperature_f: i32,
    pub guests_allowed: bool,
    pub smoking_allowed: bool,
    pub drinking_allowed: bool,
    pub parties_allowed: bool,
    pub night_time_guests_allowed: bool,
    pub accommodations: String,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            quiet_start: "22:00".to_string(),
            quiet_end: "06:00".to_string(),
            temperature_f: 72,
            guests_allowed: true,
            smoking_allowed: true,
            drinking_allowed: true,
            parties_allowed: true,
            night_time_guests_allowed: true,
            accommodations: "None".to_string(),
        }
    }
}

/// A household unit: root aggregate of the domain
///
/// Created once, mutated in place by update/patch and nested-collection
/// operations; never hard-deleted within the core. The three nested
/// collections are never null; absence is an empty ordered collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Opaque, unique, stable for the group's lifetime
    pub id: String,
    /// Never empty at rest (defaults applied when input omits it)
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Opaque URL supplied by the upload collaborator, stored verbatim
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Unique across all groups, upper-cased; used only for join lookup
    pub invite_code: String,
    /// Display list of roommates, in either accepted member shape
    #[serde(default)]
    pub roommates: Vec<MemberRef>,
    /// Membership list; the join resolver appends here and to `roommates`
    #[serde(default)]
    pub members: Vec<MemberRef>,
    #[serde(default)]
    pub components: Components,
    #[serde(default)]
    pub prefs: Prefs,
    #[serde(default)]
    pub chores: Vec<Chore>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    /// Acting-user context from the auth collaborator, when supplied
    #[serde(default)]
    pub created_by: Option<MemberRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let prefs = Prefs::default();
        assert_eq!(prefs.quiet_start, "22:00");
        assert_eq!(prefs.quiet_end, "06:00");
        assert_eq!(prefs.temperature_f, 72);
        assert!(prefs.guests_allowed && prefs.night_time_guests_allowed);
        assert_eq!(prefs.accommodations, "None");

        let components = Components::default();
        assert!(components.chores && components.expenses && components.inventory);
    }

    #[test]
    fn test_group_wire_shape() {
        let group = Group {
            id: "g1".to_string(),
            name: "Address House".to_string(),
            description: String::new(),
            photo_url: None,
            invite_code: "T38Y2Z".to_string(),
            roommates: vec![MemberRef::Id("alex@gmail.com".to_string())],
            members: Vec::new(),
            components: Components::default(),
            prefs: Prefs::default(),
            chores: Vec::new(),
            expenses: Vec::new(),
            inventory: Vec::new(),
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let v = serde_json::to_value(&group).unwrap();
        assert_eq!(v["inviteCode"], json!("T38Y2Z"));
        assert_eq!(v["prefs"]["quietStart"], json!("22:00"));
        assert_eq!(v["prefs"]["temperatureF"], json!(72));
        assert_eq!(v["components"], json!({"chores": true, "expenses": true, "inventory": true}));
        assert_eq!(v["chores"], json!([]));
    }

    #[test]
    fn test_absent_collections_deserialize_empty() {
        let v = json!({
            "id": "g2",
            "name": "Sparse",
            "inviteCode": "AAAAAA",
            "createdAt": "2025-11-01T00:00:00Z",
            "updatedAt": "2025-11-01T00:00:00Z"
        });
        let group: Group = serde_json::from_value(v).unwrap();
        assert!(group.chores.is_empty());
        assert!(group.expenses.is_empty());
        assert!(group.inventory.is_empty());
        assert_eq!(group.components, Components::default());
    }
}
