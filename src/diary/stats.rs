use std::collections::BTreeMap;

use crate::models::DiaryEntry;

/// Tallies emotion tags across `entries`.
///
/// Every catalog name is present in the result, at zero if unused. Tags are
/// counted as written: an entry listing the same emotion twice adds two, and a
/// tag missing from the catalog still gets its own key.
pub fn emotion_frequency<I>(catalog: I, entries: &[DiaryEntry]) -> BTreeMap<String, i64>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: BTreeMap<String, i64> = catalog.into_iter().map(|name| (name, 0)).collect();

    for emotion in entries.iter().flat_map(|entry| entry.emotions.iter()) {
        *counts.entry(emotion.clone()).or_insert(0) += 1;
    }

    counts
}
