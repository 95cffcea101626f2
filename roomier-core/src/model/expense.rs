//! Expense sub-entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::member::MemberRef;

/// An expense owned by exactly one group
///
/// `you_owe` is relative to the implicit current viewer, not stored
/// per-member; the dashboard partitions amounts by this flag only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Stable id, assigned at creation
    pub id: String,
    /// Required, non-empty
    pub description: String,
    /// Non-negative
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub paid_by: Option<MemberRef>,
    #[serde(default)]
    pub you_owe: bool,
    /// Set once at creation, immutable thereafter
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape_is_camel_case() {
        let expense = Expense {
            id: "e1".to_string(),
            description: "Paper towels".to_string(),
            amount: 7.5,
            paid_by: Some(MemberRef::Inline {
                name: None,
                email: Some("alex@gmail.com".to_string()),
            }),
            you_owe: true,
            created_at: Utc::now(),
        };

        let v = serde_json::to_value(&expense).unwrap();
        assert_eq!(v["paidBy"], json!({"email": "alex@gmail.com"}));
        assert_eq!(v["youOwe"], json!(true));
        assert!(v["createdAt"].is_string());
    }
}
