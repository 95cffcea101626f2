//! Dashboard projection
//!
//! A read-only summary view over a group: the canonical fields verbatim
//! plus derived counts/sums recomputed on every projection. Nothing here
//! is ever cached on the group itself, so staleness is impossible.

use serde::Serialize;

use crate::model::{Chore, Expense, Group, InventoryItem, MemberRef, Prefs};

/// Minimal group identity for the summary header
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupHeader {
    pub id: String,
    pub name: String,
}

/// Signed balance pair relative to the implicit current viewer
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Sum of amounts on expenses flagged `youOwe`
    pub you_owe: f64,
    /// Sum of amounts on the remaining expenses
    pub youre_owed: f64,
}

/// Read-optimized summary of a group
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub group: GroupHeader,
    pub prefs: Prefs,
    pub roommates: Vec<MemberRef>,
    pub chores: Vec<Chore>,
    pub expenses: Vec<Expense>,
    pub inventory: Vec<InventoryItem>,
    /// Count of chores not yet done
    pub chores_due: usize,
    pub balance: Balance,
}

/// Project a group into its dashboard view
pub fn project(group: &Group) -> DashboardView {
    let chores_due = group.chores.iter().filter(|c| !c.done).count();

    let balance = group.expenses.iter().fold(
        Balance {
            you_owe: 0.0,
            youre_owed: 0.0,
        },
        |mut acc, e| {
            if e.you_owe {
                acc.you_owe += e.amount;
            } else {
                acc.youre_owed += e.amount;
            }
            acc
        },
    );

    DashboardView {
        group: GroupHeader {
            id: group.id.clone(),
            name: group.name.clone(),
        },
        prefs: group.prefs.clone(),
        roommates: group.roommates.clone(),
        chores: group.chores.clone(),
        expenses: group.expenses.clone(),
        inventory: group.inventory.clone(),
        chores_due,
        balance,
    }
}
