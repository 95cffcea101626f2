//! Chore sub-entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::member::MemberRef;

/// Recurrence schedule for a chore
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Repeat {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

/// A chore owned by exactly one group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    /// Stable id, assigned at creation
    pub id: String,
    /// Required, non-empty
    pub title: String,
    #[serde(default)]
    pub due: Option<NaiveDate>,
    /// Free text or member reference
    #[serde(default)]
    pub assignee: Option<MemberRef>,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub done: bool,
}
