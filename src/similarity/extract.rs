//! Best-candidate extraction over scored candidate sequences.

/// A scored candidate produced by [`extract_best`] or [`extract_top_n`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate<'a> {
    /// Position of the candidate in the input sequence.
    pub index: usize,
    /// The candidate text.
    pub candidate: &'a str,
    /// Similarity score against the query (0 to 100).
    pub score: u8,
}

/// Return the single highest-scoring candidate for `query`.
///
/// Ties are broken by first occurrence in the candidate sequence: a later
/// candidate replaces the current best only with a strictly greater score.
/// Returns `None` for an empty candidate sequence.
pub fn extract_best<'a, I, F>(query: &str, candidates: I, scorer: F) -> Option<ScoredCandidate<'a>>
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str, &str) -> u8,
{
    let mut best: Option<ScoredCandidate<'a>> = None;

    for (index, candidate) in candidates.into_iter().enumerate() {
        let score = scorer(query, candidate);
        let replace = match &best {
            Some(current) => score > current.score,
            None => true,
        };
        if replace {
            best = Some(ScoredCandidate {
                index,
                candidate,
                score,
            });
        }
    }

    best
}

/// Return up to `n` candidates ordered descending by score.
///
/// Equal scores keep their input order (stable sort), so the ranking is
/// deterministic for any candidate sequence.
pub fn extract_top_n<'a, I, F>(query: &str, candidates: I, n: usize, scorer: F) -> Vec<ScoredCandidate<'a>>
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str, &str) -> u8,
{
    let mut scored: Vec<ScoredCandidate<'a>> = candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| ScoredCandidate {
            index,
            candidate,
            score: scorer(query, candidate),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(n);
    scored
}
