//! Inventory sub-entity

use serde::{Deserialize, Serialize};

/// Stock level for an inventory item
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ItemStatus {
    Low,
    #[default]
    Good,
    Full,
}

/// A shared inventory item owned by exactly one group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Stable id, assigned at creation
    pub id: String,
    /// Required, non-empty
    pub name: String,
    #[serde(default)]
    pub status: ItemStatus,
    /// Optional note; clients send this as either `info` or `description`
    #[serde(default, alias = "description")]
    pub info: Option<String>,
}
