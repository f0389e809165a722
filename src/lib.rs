//! Read-only access to dictd-format dictionaries.
//!
//! A dictionary is made up of a `.dict`/`.dict.dz` data file (plain text, or gzip with a dictzip
//! `FEXTRA` field for random access) and a `.index` file: one tab-separated
//! `headword\toffset\tlength` line per entry, sorted under one of two comparator disciplines.
//! This crate opens the pair, searches the index with binary search, and decompresses only the
//! chunks an article actually needs.
//!
//! ```no_run
//! use dictd::{Dictionary, FindMode, SortMode};
//!
//! let dict = Dictionary::open("freedict-lat-deu.index", "freedict-lat-deu.dict.dz", SortMode::Alphabetic)?;
//! if let Some(cursor) = dict.find(b"ferrugo", FindMode::Exact) {
//!     if let Some(article) = cursor.article() {
//!         println!("{}", String::from_utf8_lossy(&article));
//!     }
//! }
//! # Ok::<(), dictd::DictError>(())
//! ```
mod article;
mod cmp;
mod cursor;
mod dictionary;
mod dictzip;
mod errors;
mod file_access;
mod parsing;
mod search;
mod sort_mode;
mod validate;

pub use article::Article;
pub use cursor::Cursor;
pub use dictionary::Dictionary;
pub use errors::DictError;
pub use sort_mode::{FindMode, SortMode};
pub use validate::validate;
