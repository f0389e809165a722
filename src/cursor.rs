//! Search results.
//!
//! A `find` call never hands back a collection: it hands back a `Cursor` positioned at the
//! first matching line, which `next` walks forward one line at a time until the match window is
//! exhausted.
use std::cell::RefCell;

use crate::article::Article;
use crate::dictionary::Dictionary;
use crate::parsing;
use crate::search;

/// A matched half-open line interval `[lower, upper)` into the index, with its article
/// decompressed lazily and cached on first access.
pub struct Cursor<'a> {
    dict: &'a Dictionary,
    lower: usize,
    upper: usize,
    article: RefCell<Option<Article<'a>>>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(dict: &'a Dictionary, lower: usize, upper: usize) -> Self {
        Self { dict, lower, upper, article: RefCell::new(None) }
    }

    /// Returns the matched line's article, decompressing and caching it on first call.
    pub fn article(&self) -> Option<Article<'a>> {
        if self.article.borrow().is_none() {
            let index = self.dict.index.as_bytes();
            let line = parsing::parse_line(index, self.lower, self.upper)?;
            let article = self.dict.read_article(line.article_offset, line.article_length).ok()?;
            *self.article.borrow_mut() = Some(article);
        }
        self.article.borrow().clone()
    }

    /// Advances to the next matching line, or `None` once the window `[lower, upper)` is
    /// exhausted.
    pub fn next(&self) -> Option<Cursor<'a>> {
        let index = self.dict.index.as_bytes();
        let next_lower = search::nextline(index, self.lower);
        if next_lower >= self.upper {
            return None;
        }
        Some(Cursor::new(self.dict, next_lower, self.upper))
    }

    /// Releases the cursor. A no-op beyond ordinary drop; present for parity with callers used
    /// to an explicit free step.
    pub fn free(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort_mode::{FindMode, SortMode};
    use std::io::Write;

    fn write_tmp(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents).unwrap();
        f
    }

    #[test]
    fn walks_every_line_in_a_prefix_match() {
        let index = write_tmp(b"cat\tA\tB\ncats\tA\tB\ndog\tA\tB\n");
        let data = write_tmp(b"AB");
        let dict = Dictionary::open(index.path(), data.path(), SortMode::Alphabetic).unwrap();

        let cursor = dict.find(b"cat", FindMode::StartsWith).unwrap();
        assert!(cursor.article().is_some());
        let cursor = cursor.next().unwrap();
        assert!(cursor.article().is_some());
        assert!(cursor.next().is_none());
    }

    #[test]
    fn article_is_cached_across_calls() {
        let index = write_tmp(b"hello\tA\tF\n");
        let data = write_tmp(b"Hello!");
        let dict = Dictionary::open(index.path(), data.path(), SortMode::Alphabetic).unwrap();
        let cursor = dict.find(b"hello", FindMode::Exact).unwrap();
        let first = cursor.article().unwrap();
        let second = cursor.article().unwrap();
        assert_eq!(&first[..], &second[..]);
    }
}
