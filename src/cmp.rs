//! Headword comparators.
//!
//! Two orthogonal dimensions combine into the four comparators used by search and by the
//! validator: full equality vs. prefix match, and byte-exact vs. "skip anything that is not
//! alphanumeric or whitespace, fold ASCII case". A tab byte, or simply running out of bytes in
//! the slice under comparison, marks the end of a headword field on either side -- unlike the
//! reference's NUL-terminated C strings, slices here are not terminated, so "ran off the end"
//! has to mean the same thing a terminator would.
use std::cmp::Ordering;

/// Byte-exact comparison up to the first tab (or end of slice) on either side.
pub fn strcmp(lhs: &[u8], rhs: &[u8]) -> Ordering {
    let mut li = 0;
    let mut ri = 0;
    loop {
        let lb = lhs.get(li).copied().filter(|&b| b != b'\t');
        let rb = rhs.get(ri).copied().filter(|&b| b != b'\t');
        match (lb, rb) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => match a.cmp(&b) {
                Ordering::Equal => {
                    li += 1;
                    ri += 1;
                }
                other => return other,
            },
        }
    }
}

/// Does `line` start with `prefix`, byte-exact? Prefix exhaustion is a match regardless of what
/// follows in `line`.
pub fn prefix_cmp(prefix: &[u8], line: &[u8]) -> Ordering {
    let mut pi = 0;
    let mut si = 0;
    loop {
        let pb = match prefix.get(pi) {
            Some(&b) => b,
            None => return Ordering::Equal,
        };
        match line.get(si) {
            None | Some(b'\t') => return Ordering::Greater,
            Some(&sb) => match pb.cmp(&sb) {
                Ordering::Equal => {
                    pi += 1;
                    si += 1;
                }
                other => return other,
            },
        }
    }
}

fn is_boundary(b: Option<u8>) -> bool {
    matches!(b, None | Some(b'\t'))
}

/// ASCII bytes that participate in a "skip non-alphanumeric" comparison: alphanumerics,
/// whitespace, and anything >= 0x80 (treated as opaque and never skipped).
fn keeps(b: u8) -> bool {
    b >= 0x80 || b.is_ascii_alphanumeric() || b == b' ' || b == b'\t'
}

fn skip_noise(s: &[u8], mut i: usize) -> usize {
    while let Some(&b) = s.get(i) {
        if b == b'\t' || keeps(b) {
            break;
        }
        i += 1;
    }
    i
}

/// Case-folded equality, skipping ASCII punctuation/control bytes on both sides.
pub fn dict_cmp(lhs: &[u8], rhs: &[u8]) -> Ordering {
    let mut li = 0;
    let mut ri = 0;
    loop {
        li = skip_noise(lhs, li);
        ri = skip_noise(rhs, ri);

        let lb = lhs.get(li).copied().filter(|&b| b != b'\t');
        let rb = rhs.get(ri).copied().filter(|&b| b != b'\t');

        match (lb, rb) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => {
                let (a, b) = (a.to_ascii_lowercase(), b.to_ascii_lowercase());
                match a.cmp(&b) {
                    Ordering::Equal => {
                        li += 1;
                        ri += 1;
                    }
                    other => return other,
                }
            }
        }
    }
}

/// Does `line` start with `prefix`, skipping ASCII punctuation/control bytes and folding case?
/// Prefix exhaustion (after skipping its own trailing noise) is a match.
pub fn prefix_dict_cmp(prefix: &[u8], line: &[u8]) -> Ordering {
    let mut pi = 0;
    let mut si = 0;
    loop {
        pi = skip_noise(prefix, pi);
        if is_boundary(prefix.get(pi).copied()) {
            return Ordering::Equal;
        }
        si = skip_noise(line, si);

        match line.get(si) {
            None | Some(b'\t') => return Ordering::Greater,
            Some(&sb) => {
                let pb = prefix[pi].to_ascii_lowercase();
                let sb = sb.to_ascii_lowercase();
                match pb.cmp(&sb) {
                    Ordering::Equal => {
                        pi += 1;
                        si += 1;
                    }
                    other => return other,
                }
            }
        }
    }
}
