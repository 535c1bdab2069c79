//! Edit-distance matching for model output lines
//!
//! The model is asked to continue a few-shot prompt, so its output usually
//! echoes the prompt verbatim. When the echo comes back mangled instead,
//! the extractor finds the line closest to the user's query by Levenshtein
//! distance and reads the answer from the lines after it.

/// Levenshtein edit distance between two strings, counted in characters.
///
/// Insertions, deletions, and substitutions each cost 1. Runs a single
/// iterative pass over two rows; the arguments are swapped up front so the
/// shorter string drives the row width.
pub fn distance(a: &str, b: &str) -> usize {
    let mut a: Vec<char> = a.chars().collect();
    let mut b: Vec<char> = b.chars().collect();

    // Keep the row sized by the shorter string
    if a.len() < b.len() {
        std::mem::swap(&mut a, &mut b);
    }

    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Index of the line nearest to `target`, ties broken by first occurrence.
///
/// Returns `None` only when `lines` is empty.
pub fn nearest_line(target: &str, lines: &[&str]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    for (idx, line) in lines.iter().enumerate() {
        let d = distance(target, line);
        match best {
            Some((_, best_d)) if best_d <= d => {}
            _ => best = Some((idx, d)),
        }
    }

    best.map(|(idx, _)| idx)
}
