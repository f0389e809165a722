//! Binary search over a sorted, newline-delimited index.
//!
//! `find_entry` locates the half-open interval `[lower, upper)` of lines whose headword matches
//! a query under a given comparator. All three phases (locate any match, bracket the lower
//! bound, bracket the upper bound) are loop-based rather than recursive, so a pathological input
//! cannot grow the stack.
use std::cmp::Ordering;

pub type Cmp = fn(&[u8], &[u8]) -> Ordering;

/// Position just past the next `\n` at or after `pos`.
pub(crate) fn nextline(buf: &[u8], pos: usize) -> usize {
    match buf[pos..].iter().position(|&b| b == b'\n') {
        Some(rel) => pos + rel + 1,
        None => buf.len(),
    }
}

/// Scans backward from `pos` to the start of the line containing it.
fn line_start(buf: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i > 0 && buf[i - 1] != b'\n' {
        i -= 1;
    }
    i
}

/// The start of the line immediately preceding the line that starts at `line_begin`, scanning
/// back from the true beginning of the index (position 0) rather than from a local search-window
/// floor.
///
/// A local floor is what the reference implementation uses, and it is wrong in exactly the case
/// that matters here: once a recursive window has shrunk to a single line, the reference's
/// `start` argument is *already* sitting at that line's own beginning, so scanning backward no
/// further than `start` can only ever stop immediately on the previous line's trailing `\n`
/// rather than walking onto its content. Since the whole index is one contiguous mapped range
/// for the duration of a search, scanning from offset zero costs nothing extra and gives the
/// right answer.
fn prevline_start(buf: &[u8], line_begin: usize) -> usize {
    debug_assert!(line_begin > 0);
    line_start(buf, line_begin - 1)
}

/// Binary search in `[start, end)` for the earliest line matching `cmp` against `prefix`,
/// given that at least one matching line exists in the window.
fn lower_bound(buf: &[u8], cmp: Cmp, prefix: &[u8], mut start: usize, mut end: usize) -> usize {
    loop {
        let middle = line_start(buf, start + (end - start) / 2);
        let next = nextline(buf, middle);

        if middle == start && next == end {
            return middle;
        }

        let c = cmp(prefix, &buf[middle..]);
        if c == Ordering::Greater {
            start = next;
            continue;
        }

        if next == end {
            let prev = prevline_start(buf, middle);
            let c = cmp(prefix, &buf[prev..]);
            if c == Ordering::Greater {
                return middle;
            }
            end = middle;
            continue;
        }

        end = next;
    }
}

/// Binary search in `[start, end)` for the first line that does NOT match `cmp` against
/// `prefix`; may return `end` if every line in the window matches.
fn upper_bound(buf: &[u8], cmp: Cmp, prefix: &[u8], mut start: usize, mut end: usize) -> usize {
    loop {
        if start == end {
            return start;
        }

        let middle = line_start(buf, start + (end - start) / 2);
        let next = nextline(buf, middle);

        let c = cmp(prefix, &buf[middle..]);
        if c == Ordering::Equal {
            start = next;
            continue;
        }

        if next == end {
            let prev = prevline_start(buf, middle);
            let c = cmp(prefix, &buf[prev..]);
            if c == Ordering::Equal {
                return middle;
            }
            end = middle;
            continue;
        }

        end = next;
    }
}

/// Searches `[start, end)` for the half-open interval of lines matching `prefix` under `cmp`.
/// Returns `None` if no line matches.
pub fn find_entry(buf: &[u8], cmp: Cmp, prefix: &[u8], mut start: usize, end: usize) -> Option<(usize, usize)> {
    let mut window_end = end;

    while start < window_end {
        let middle = line_start(buf, start + (window_end - start) / 2);
        let next = nextline(buf, middle);

        match cmp(prefix, &buf[middle..]) {
            Ordering::Equal => {
                let lower = lower_bound(buf, cmp, prefix, start, next);
                let upper = upper_bound(buf, cmp, prefix, next, end);
                return Some((lower, upper));
            }
            Ordering::Greater => start = next,
            Ordering::Less => window_end = middle,
        }
    }

    None
}
