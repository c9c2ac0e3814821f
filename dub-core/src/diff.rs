//! Character-level diff used to highlight what changes between an old and a
//! new file name.
//!
//! The diff is a classic longest-common-subsequence table walked back from the
//! bottom-right corner. When the table allows either an insert or a delete
//! step, the insert is taken, which keeps deletions ahead of insertions once
//! the operations are reversed into reading order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Equal,
    Delete,
    Insert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub text: String,
    pub kind: DiffKind,
}

impl DiffSegment {
    pub fn new(text: impl Into<String>, kind: DiffKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Compute the diff between `old` and `new`.
///
/// Returns the segments for the old side (Equal and Delete) and for the new
/// side (Equal and Insert). Concatenating either side reproduces its input.
pub fn compute_diff(old: &str, new: &str) -> (Vec<DiffSegment>, Vec<DiffSegment>) {
    if old == new {
        if old.is_empty() {
            return (Vec::new(), Vec::new());
        }
        let segments = vec![DiffSegment::new(old, DiffKind::Equal)];
        return (segments.clone(), segments);
    }

    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();
    let table = lcs_table(&old_chars, &new_chars);

    let mut ops: Vec<(char, DiffKind)> = Vec::with_capacity(old_chars.len() + new_chars.len());
    let (mut i, mut j) = (old_chars.len(), new_chars.len());
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old_chars[i - 1] == new_chars[j - 1] {
            ops.push((old_chars[i - 1], DiffKind::Equal));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i][j - 1] >= table[i - 1][j]) {
            ops.push((new_chars[j - 1], DiffKind::Insert));
            j -= 1;
        } else {
            ops.push((old_chars[i - 1], DiffKind::Delete));
            i -= 1;
        }
    }
    ops.reverse();

    let mut old_segments = Vec::new();
    let mut new_segments = Vec::new();
    for (ch, kind) in ops {
        match kind {
            DiffKind::Equal => {
                push_char(&mut old_segments, ch, kind);
                push_char(&mut new_segments, ch, kind);
            },
            DiffKind::Delete => push_char(&mut old_segments, ch, kind),
            DiffKind::Insert => push_char(&mut new_segments, ch, kind),
        }
    }

    (old_segments, new_segments)
}

/// Join the text of every segment, which reconstructs the side's input.
pub fn join_segments(segments: &[DiffSegment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

fn push_char(segments: &mut Vec<DiffSegment>, ch: char, kind: DiffKind) {
    match segments.last_mut() {
        Some(last) if last.kind == kind => last.text.push(ch),
        _ => segments.push(DiffSegment::new(ch.to_string(), kind)),
    }
}

fn lcs_table(a: &[char], b: &[char]) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table
}
