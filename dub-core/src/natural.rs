use crate::scanner::FileEntry;
use std::cmp::Ordering;

/// Sort files by name so embedded numbers compare by value
/// (`file_2` before `file_10`). The sort is stable.
pub fn natural_sort(files: &mut [FileEntry]) {
    files.sort_by(|a, b| natural_compare(&a.name, &b.name));
}

/// Compare two names using natural ordering.
///
/// Both names are lowercased first. Digit runs compare by numeric value and,
/// when equal, the shorter run sorts first (`1` < `01` < `001`). Everything
/// else compares byte by byte, and a name that runs out first sorts first.
pub fn natural_compare(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let a = a.as_bytes();
    let b = b.as_bytes();

    let (mut ai, mut bi) = (0, 0);
    while ai < a.len() && bi < b.len() {
        if a[ai].is_ascii_digit() && b[bi].is_ascii_digit() {
            let a_end = digit_run_end(a, ai);
            let b_end = digit_run_end(b, bi);

            let ord = compare_digit_runs(&a[ai..a_end], &b[bi..b_end])
                .then((a_end - ai).cmp(&(b_end - bi)));
            if ord != Ordering::Equal {
                return ord;
            }
            ai = a_end;
            bi = b_end;
        } else {
            if a[ai] != b[bi] {
                return a[ai].cmp(&b[bi]);
            }
            ai += 1;
            bi += 1;
        }
    }

    a.len().cmp(&b.len())
}

fn digit_run_end(s: &[u8], start: usize) -> usize {
    s[start..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(s.len(), |offset| start + offset)
}

/// Compare two runs of ASCII digits by numeric value without parsing, so
/// arbitrarily long runs never overflow.
fn compare_digit_runs(a: &[u8], b: &[u8]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(run: &[u8]) -> &[u8] {
    let first = run.iter().position(|&c| c != b'0').unwrap_or(run.len());
    &run[first..]
}
