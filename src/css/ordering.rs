//! Deduplication and natural-order sorting of list entries.
//!
//! Natural order compares strings character by character, except that
//! maximal runs of ASCII digits compare by numeric value:
//!
//! ```text
//! .item1 < .item2 < .item10 < .item11
//! ```
//!
//! Runs that are numerically equal but spelled differently (`01` vs `1`)
//! fall back to plain string comparison, so two keys only compare equal when
//! they are the same string.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::config::Options;

/// Compare two keys in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (x, y) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);

    while i < x.len() && j < y.len() {
        if x[i].is_ascii_digit() && y[j].is_ascii_digit() {
            let end_i = digit_run_end(x, i);
            let end_j = digit_run_end(y, j);
            match compare_digit_runs(&x[i..end_i], &y[j..end_j]) {
                Ordering::Equal => {
                    i = end_i;
                    j = end_j;
                }
                ord => return ord,
            }
        } else {
            // Byte order of UTF-8 matches code point order.
            match x[i].cmp(&y[j]) {
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                ord => return ord,
            }
        }
    }

    (x.len() - i)
        .cmp(&(y.len() - j))
        .then_with(|| a.cmp(b))
}

fn digit_run_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |len| start + len)
}

/// Compare two digit runs by value without parsing, so runs of any length work.
fn compare_digit_runs(a: &[u8], b: &[u8]) -> Ordering {
    let a = trim_leading_zeros(a);
    let b = trim_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn trim_leading_zeros(digits: &[u8]) -> &[u8] {
    let zeros = digits.iter().take_while(|&&d| d == b'0').count();
    &digits[zeros..]
}

/// Remove entries whose key repeats an earlier one, then sort by key in
/// natural order. Either stage can be switched off through `options`.
///
/// The first occurrence of a duplicate is the one kept, and sorting runs
/// after deduplication so later duplicates never affect position. The sort
/// is stable, which only matters when deduplication is off.
pub fn canonicalize<T, F>(entries: Vec<T>, key: F, options: &Options) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let mut keyed: Vec<(String, T)> = entries.into_iter().map(|e| (key(&e), e)).collect();

    if options.dedupe {
        let mut seen = HashSet::with_capacity(keyed.len());
        keyed.retain(|(key, _)| seen.insert(key.clone()));
    }

    if options.sort {
        keyed.sort_by(|(a, _), (b, _)| natural_cmp(a, b));
    }

    keyed.into_iter().map(|(_, entry)| entry).collect()
}
