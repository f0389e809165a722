use crate::cmp::{self, dict_cmp, prefix_cmp, prefix_dict_cmp, strcmp};
use crate::search::Cmp;

/// Which comparator family an index was sorted under, or an error outcome from `validate`.
///
/// Mirrors the reference's numeric sort-mode enumeration directly: negative values are errors,
/// non-negative values identify a comparator, and `alphabetic` is conventionally "finer than"
/// `skip_non_alphanumeric`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i8)]
pub enum SortMode {
    Malformed = -2,
    Unknown = -1,
    Alphabetic = 0,
    SkipNonAlphanumeric = 1,
}

impl SortMode {
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

/// Which kind of match a `find` call should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindMode {
    Exact,
    StartsWith,
}

/// Selects the exact/prefix comparator pair for a given sort discipline.
pub(crate) fn comparator(mode: SortMode, find_mode: FindMode) -> Option<Cmp> {
    match (mode, find_mode) {
        (SortMode::Alphabetic, FindMode::Exact) => Some(strcmp),
        (SortMode::Alphabetic, FindMode::StartsWith) => Some(prefix_cmp),
        (SortMode::SkipNonAlphanumeric, FindMode::Exact) => Some(dict_cmp),
        (SortMode::SkipNonAlphanumeric, FindMode::StartsWith) => Some(prefix_dict_cmp),
        _ => None,
    }
}

/// The two comparators the validator checks line order against, indexed the same way as
/// `SortMode`'s non-negative variants.
pub(crate) fn full_comparators() -> [(SortMode, fn(&[u8], &[u8]) -> std::cmp::Ordering); 2] {
    [(SortMode::Alphabetic, cmp::strcmp), (SortMode::SkipNonAlphanumeric, cmp::dict_cmp)]
}
