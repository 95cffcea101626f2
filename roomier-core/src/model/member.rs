//! Member references
//!
//! Roommates and members arrive either as a bare string identifier/email or
//! as an inline `{name, email}` record. Both forms are accepted and stored
//! as supplied; matching for idempotent joins uses a derived key instead of
//! collapsing the shapes.

use serde::{Deserialize, Serialize};

/// A reference to a household member, in either accepted wire shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MemberRef {
    /// Bare identifier or email string
    Id(String),
    /// Inline record with optional name/email
    Inline {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
}

impl MemberRef {
    /// Parse a member reference from a raw JSON value, if it has one of the
    /// accepted shapes
    pub fn from_value(raw: &serde_json::Value) -> Option<MemberRef> {
        match raw {
            serde_json::Value::String(s) if !s.trim().is_empty() => {
                Some(MemberRef::Id(s.clone()))
            }
            serde_json::Value::Object(_) => serde_json::from_value(raw.clone()).ok(),
            _ => None,
        }
    }

    /// Case-insensitive identity key used for membership matching.
    ///
    /// Prefers the email when the record carries one; falls back to the bare
    /// identifier or name. Empty keys never match anything.
    pub fn key(&self) -> String {
        match self {
            MemberRef::Id(s) => s.trim().to_lowercase(),
            MemberRef::Inline { name, email } => email
                .as_deref()
                .or(name.as_deref())
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_default(),
        }
    }

    /// True when both references resolve to the same non-empty key
    pub fn same_member(&self, other: &MemberRef) -> bool {
        let key = self.key();
        !key.is_empty() && key == other.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_both_wire_shapes_accepted() {
        let bare = MemberRef::from_value(&json!("alex@gmail.com")).unwrap();
        assert_eq!(bare, MemberRef::Id("alex@gmail.com".to_string()));

        let inline = MemberRef::from_value(&json!({"name": "Alex", "email": "alex@gmail.com"}))
            .unwrap();
        assert_eq!(
            inline,
            MemberRef::Inline {
                name: Some("Alex".to_string()),
                email: Some("alex@gmail.com".to_string()),
            }
        );
    }

    #[test]
    fn test_shapes_preserved_on_serialization() {
        let bare = MemberRef::Id("sam@gmail.com".to_string());
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!("sam@gmail.com"));

        let inline = MemberRef::Inline {
            name: None,
            email: Some("sam@gmail.com".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&inline).unwrap(),
            json!({"email": "sam@gmail.com"})
        );
    }

    #[test]
    fn test_matching_is_case_insensitive_across_shapes() {
        let bare = MemberRef::Id("Alex@Gmail.com".to_string());
        let inline = MemberRef::Inline {
            name: Some("Alex".to_string()),
            email: Some("alex@gmail.com".to_string()),
        };
        assert!(bare.same_member(&inline));
    }

    #[test]
    fn test_empty_keys_never_match() {
        let a = MemberRef::Inline { name: None, email: None };
        let b = MemberRef::Inline { name: None, email: None };
        assert!(!a.same_member(&b));
    }

    #[test]
    fn test_rejects_non_member_values() {
        assert_eq!(MemberRef::from_value(&json!(42)), None);
        assert_eq!(MemberRef::from_value(&json!("   ")), None);
        assert_eq!(MemberRef::from_value(&json!(null)), None);
    }
}
