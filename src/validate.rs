//! Index/data consistency checking and sort-mode detection.
use std::cmp::Ordering;
use std::path::Path;

use crate::dictionary::DataBody;
use crate::parsing;
use crate::sort_mode::{self, SortMode};
use crate::Dictionary;

/// Headword prefixes identifying pseudo-entries (dictionary metadata, not real headwords): they
/// are bounds-checked like any other line but excluded from the sort-order comparison and do not
/// themselves become the `prev_name` baseline used only for comparison... they still do become
/// the carried-forward baseline, just an uncompared one.
fn is_pseudo_entry(headword: &[u8]) -> bool {
    headword.starts_with(b"00database") || headword.starts_with(b"00-database-")
}

/// Opens `index_path`/`data_path` and reports the strictest sort discipline the index's line
/// order is consistent with, or `SortMode::Malformed` if the files fail to open, the data file
/// fails to decompress, or any index line is syntactically invalid or points outside the data
/// file, or `SortMode::Unknown` if no comparator holds.
pub fn validate<P: AsRef<Path>, Q: AsRef<Path>>(index_path: P, data_path: Q) -> SortMode {
    let dict = match Dictionary::open(index_path, data_path, SortMode::Unknown) {
        Ok(d) => d,
        Err(_) => return SortMode::Malformed,
    };

    let data_size = match &dict.body {
        DataBody::Plain => dict.data.len() as u64,
        DataBody::Dictzip(dz) => match dz.test_decompress_all(dict.data.as_bytes()) {
            Ok(n) => n,
            Err(_) => return SortMode::Malformed,
        },
    };

    validate_index(dict.index.as_bytes(), data_size)
}

fn validate_index(index: &[u8], data_size: u64) -> SortMode {
    let comparators = sort_mode::full_comparators();
    let mut valid = [true; 2];
    let mut prev_name: Option<(usize, usize)> = None;

    let len = index.len();
    let mut pos = 0usize;
    let mut line_number = 0usize;

    while pos < len {
        let line = match parsing::parse_line_checked(index, pos, len, line_number) {
            Ok(l) => l,
            Err(e) => {
                log::warn!("line {}: malformed index entry: {}", line_number, e);
                return SortMode::Malformed;
            }
        };

        if line.article_offset.saturating_add(line.article_length) > data_size {
            log::warn!(
                "line {}: article range {}..{} falls outside the {}-byte data file",
                line_number,
                line.article_offset,
                line.article_offset.saturating_add(line.article_length),
                data_size
            );
            return SortMode::Malformed;
        }

        let headword = line.headword(index);
        if !is_pseudo_entry(headword) {
            if let Some((prev_start, prev_end)) = prev_name {
                let prev = &index[prev_start..prev_end];
                for (valid_slot, cmp) in valid.iter_mut().zip(comparators.iter().map(|(_, c)| c)) {
                    if *valid_slot && cmp(prev, headword) == Ordering::Greater {
                        *valid_slot = false;
                    }
                }
            }
        }
        prev_name = Some((line.headword_start, line.headword_end));

        pos = line.next_line;
        line_number += 1;
    }

    for (slot, (mode, _)) in valid.iter().zip(comparators.iter()) {
        if *slot {
            return *mode;
        }
    }
    SortMode::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_index_is_vacuously_alphabetic() {
        assert_eq!(validate_index(b"", 0), SortMode::Alphabetic);
    }

    #[test]
    fn strictly_alphabetic_order_is_detected() {
        let index = b"alpha\tA\tA\nbeta\tA\tA\n";
        assert_eq!(validate_index(index, 2), SortMode::Alphabetic);
    }

    #[test]
    fn punctuation_insensitive_order_falls_back_to_skip_non_alphanumeric() {
        // "coop" < "co-op" byte-for-byte is false ('o' > '-'), so strict alphabetic order is
        // violated; but with punctuation skipped the two headwords compare equal, so the
        // skip-non-alphanumeric discipline still holds.
        let index = b"coop\tA\tA\nco-op\tA\tA\n";
        assert_eq!(validate_index(index, 2), SortMode::SkipNonAlphanumeric);
    }

    #[test]
    fn out_of_order_headwords_yield_unknown() {
        let index = b"zzz\tA\tA\naaa\tA\tA\n";
        assert_eq!(validate_index(index, 2), SortMode::Unknown);
    }

    #[test]
    fn pseudo_entries_are_bounds_checked_but_not_compared() {
        let index = b"zzz\tA\tA\n00-database-info\tA\tZZZZZZZZ\naaa\tA\tA\n";
        assert_eq!(validate_index(index, 2), SortMode::Malformed);
    }

    #[test]
    fn pseudo_entries_do_not_break_sort_order() {
        let index = b"aaa\tA\tA\n00-database-info\tA\tA\nbbb\tA\tA\n";
        assert_eq!(validate_index(index, 2), SortMode::Alphabetic);
    }

    #[test]
    fn malformed_line_is_reported() {
        let index = b"missing-a-column\tA\n";
        assert_eq!(validate_index(index, 100), SortMode::Malformed);
    }

    #[test]
    fn article_past_end_of_data_is_malformed() {
        let index = b"word\tA\tZZZZZZZZ\n";
        assert_eq!(validate_index(index, 10), SortMode::Malformed);
    }
}
