use tnote_notes::NoteRecord;

/// Subsequence match score, lower is better.
///
/// Case-insensitive; whitespace in the query is ignored. `None` when the
/// query characters do not all appear in order.
pub fn fuzzy_score(query: &str, text: &str) -> Option<usize> {
    let mut wanted = query.chars().filter(|c| !c.is_whitespace()).peekable();
    let mut score = 0;
    let mut last: Option<usize> = None;

    for (pos, t) in text.chars().enumerate() {
        let Some(&q) = wanted.peek() else {
            break;
        };
        if q.to_lowercase().eq(t.to_lowercase()) {
            score += match last {
                Some(prev) => pos - prev - 1,
                None => pos,
            };
            last = Some(pos);
            wanted.next();
        }
    }

    wanted.peek().is_none().then_some(score)
}

/// Indices of the notes matching `query` on filename or title, best first.
/// Equal scores keep the notes' own order.
pub fn rank(query: &str, notes: &[NoteRecord]) -> Vec<usize> {
    let mut scored: Vec<(usize, usize)> = notes
        .iter()
        .enumerate()
        .filter_map(|(idx, note)| {
            [note.filename(), note.title()]
                .into_iter()
                .filter_map(|text| fuzzy_score(query, text))
                .min()
                .map(|score| (score, idx))
        })
        .collect();
    scored.sort_unstable();
    scored.into_iter().map(|(_, idx)| idx).collect()
}
