/// How one position of the reference text compares with the typed input
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum CharOutcome {
    Correct,
    Incorrect,
    /// Reference character not reached yet
    Pending,
    /// Typed past the end of the reference
    Extra,
}

/// A reference or typed character together with its outcome
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct DiffChar {
    pub char: char,
    pub outcome: CharOutcome,
}

/// Position-by-position diff of `typed` against `reference`.
///
/// Covers `max(len(reference), len(typed))` positions. Mismatches carry the
/// typed character so the caller can show what was actually pressed.
pub fn diff_chars(reference: &str, typed: &str) -> Vec<DiffChar> {
    let mut expected = reference.chars();
    let mut actual = typed.chars();
    let mut out = Vec::with_capacity(reference.len().max(typed.len()));

    loop {
        let next = match (expected.next(), actual.next()) {
            (Some(e), Some(a)) if e == a => DiffChar {
                char: e,
                outcome: CharOutcome::Correct,
            },
            (Some(_), Some(a)) => DiffChar {
                char: a,
                outcome: CharOutcome::Incorrect,
            },
            (Some(e), None) => DiffChar {
                char: e,
                outcome: CharOutcome::Pending,
            },
            (None, Some(a)) => DiffChar {
                char: a,
                outcome: CharOutcome::Extra,
            },
            (None, None) => break,
        };
        out.push(next);
    }

    out
}

/// Typed characters that do not match the reference
pub fn mistakes(reference: &str, typed: &str) -> usize {
    diff_chars(reference, typed)
        .iter()
        .filter(|c| matches!(c.outcome, CharOutcome::Incorrect | CharOutcome::Extra))
        .count()
}
