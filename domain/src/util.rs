//! Shared utility functions.

/// Split a comma-separated input into trimmed, non-empty items.
///
/// Used for approver references and labels, where a blank entry carries no
/// meaning (`"alice, ,bob"` yields `["alice", "bob"]`).
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove duplicates from `items` while keeping first-seen order.
///
/// Comparison is exact (case-sensitive).
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
