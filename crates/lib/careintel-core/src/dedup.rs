use std::collections::HashSet;

use careintel_records::Record;

/// Drops every record whose identity key was already seen, keeping the first
/// occurrence and the input order. Later copies are dropped as-is, with no
/// field merge. Records without an identity key are always kept.
pub fn dedup_by_identity<T: Record>(records: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            record
                .identity_key()
                .is_none_or(|key| seen.insert(key.into_owned()))
        })
        .collect()
}
