//! Short URL-safe identifier allocation
//!
//! Groups, nested items, and invite codes all use short random ids drawn
//! from URL-safe alphabets. Uniqueness against an existing population is
//! the caller's concern: the collection manager retries on intra-collection
//! collision and the store layer retries against persisted groups.

use rand::Rng;

/// URL-safe alphabet for group and item ids
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Upper-case alphanumeric alphabet for invite codes (human-typed)
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Group id length (short, shows up in URLs)
const GROUP_ID_LEN: usize = 6;

/// Nested item id length
const ITEM_ID_LEN: usize = 21;

/// Invite code length
const INVITE_CODE_LEN: usize = 6;

fn sample(alphabet: &[u8], len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Generate a fresh group id
pub fn group_id() -> String {
    sample(ID_ALPHABET, GROUP_ID_LEN)
}

/// Generate a fresh id for a nested item (chore, expense, inventory item)
pub fn item_id() -> String {
    sample(ID_ALPHABET, ITEM_ID_LEN)
}

/// Generate a fresh invite code (already upper-cased)
pub fn invite_code() -> String {
    sample(CODE_ALPHABET, INVITE_CODE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_lengths() {
        assert_eq!(group_id().len(), 6);
        assert_eq!(item_id().len(), 21);
        assert_eq!(invite_code().len(), 6);
    }

    #[test]
    fn test_ids_are_url_safe() {
        let id = item_id();
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    }

    #[test]
    fn test_invite_codes_are_upper_case_alphanumeric() {
        for _ in 0..50 {
            let code = invite_code();
            assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
            assert_eq!(code, code.to_uppercase());
        }
    }

    #[test]
    fn test_item_ids_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| item_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
