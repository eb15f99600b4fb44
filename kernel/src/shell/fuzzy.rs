//! Edit-distance suggestions for mistyped command names.

use super::commands::BUILTINS;

/// Comparison length bound. Longer inputs are truncated for scoring only.
const DISTANCE_BOUND: usize = 31;

/// A suggestion fires only when the best distance is at most this.
const SUGGEST_THRESHOLD: usize = 2;

/// Levenshtein distance with unit-cost insert, delete and substitute,
/// computed with the two-row recurrence over fixed-size rows.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a = &a.as_bytes()[..a.len().min(DISTANCE_BOUND)];
    let b = &b.as_bytes()[..b.len().min(DISTANCE_BOUND)];

    let mut prev = [0usize; DISTANCE_BOUND + 1];
    let mut curr = [0usize; DISTANCE_BOUND + 1];
    for (j, slot) in prev.iter_mut().enumerate().take(b.len() + 1) {
        *slot = j;
    }

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev[..=b.len()].copy_from_slice(&curr[..=b.len()]);
    }

    prev[b.len()]
}

/// Best-matching builtin name for a mistyped token, or `None` when nothing
/// is close enough. Ties keep the earliest table entry.
pub fn suggest(token: &str) -> Option<&'static str> {
    let mut best: Option<(&'static str, usize)> = None;
    for (name, _) in BUILTINS {
        let d = levenshtein(token, name);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((name, d));
        }
    }
    match best {
        Some((name, d)) if d <= SUGGEST_THRESHOLD => Some(name),
        _ => None,
    }
}
