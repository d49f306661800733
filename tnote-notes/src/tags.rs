use std::collections::{BTreeSet, HashMap};

use crate::models::NoteRecord;

/// True when every required tag appears in `actual`.
///
/// Exact, case-sensitive comparison. An empty requirement matches anything.
pub fn tags_match(required: &BTreeSet<String>, actual: &[String]) -> bool {
    required.iter().all(|tag| actual.contains(tag))
}

/// Number of notes carrying each tag, most used first, ties by name.
///
/// A tag repeated inside one note counts once for that note.
pub fn tag_counts(notes: &[NoteRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for note in notes {
        let distinct: BTreeSet<&str> = note.tags().iter().map(String::as_str).collect();
        for tag in distinct {
            *counts.entry(tag).or_default() += 1;
        }
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
