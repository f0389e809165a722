use rassert_rs::rassert;
use std::path::Path;

use crate::article::Article;
use crate::cmp;
use crate::dictzip::{self, Dictzip, DzHeader};
use crate::errors::DictError;
use crate::file_access::ByteRange;
use crate::parsing;
use crate::search;
use crate::sort_mode::{self, FindMode, SortMode};
use crate::Cursor;
use DictError::*;

pub(crate) enum DataBody {
    Plain,
    Dictzip(Dictzip),
}

/// An opened dictionary: an index file and a data file, mapped read-only for the handle's
/// lifetime.
///
/// Not `Send`/`Sync` by design: the chunk cache uses interior mutability on the assumption of a
/// single thread-confined handle, matching the non-goal of concurrent readers sharing live
/// decompression state.
pub struct Dictionary {
    pub(crate) index: ByteRange,
    pub(crate) data: ByteRange,
    pub(crate) sort_mode: SortMode,
    pub(crate) body: DataBody,
}

impl Dictionary {
    /// Opens `index_path`/`data_path`, detecting whether the data file is dictzip-compressed.
    ///
    /// `sort_mode` selects the comparator family [`find`](Dictionary::find) uses; passing
    /// `SortMode::Unknown` (the validator's internal "unspecified" mode) is legal but makes
    /// every `find` call return `None`, since no comparator is associated with it.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(index_path: P, data_path: Q, sort_mode: SortMode) -> Result<Self, DictError> {
        let index = ByteRange::open(index_path)?;
        let data = ByteRange::open(data_path)?;

        let body = match dictzip::parse(data.as_bytes())? {
            DzHeader::NotDictzip => DataBody::Plain,
            DzHeader::Dictzip(dz) => DataBody::Dictzip(dz),
        };

        Ok(Self { index, data, sort_mode, body })
    }

    /// Reads the article at `(offset, length)` in the logical uncompressed data stream.
    pub(crate) fn read_article(&self, offset: u64, length: u64) -> Result<Article<'_>, DictError> {
        match &self.body {
            DataBody::Plain => {
                let start = offset as usize;
                let end = start.checked_add(length as usize).ok_or_else(|| {
                    Io(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("article offset {} and length {} overflow", offset, length),
                    ))
                })?;
                rassert!(
                    end <= self.data.len(),
                    Io(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "article range runs past the end of uncompressed data"
                    ))
                );
                Ok(Article::Borrowed(&self.data.as_bytes()[start..end]))
            }
            DataBody::Dictzip(dz) => {
                let bytes = dz.read(self.data.as_bytes(), offset, length)?;
                Ok(Article::Owned(bytes.into()))
            }
        }
    }

    /// Searches the index for `text` under the handle's sort discipline.
    pub fn find(&self, text: &[u8], mode: FindMode) -> Option<Cursor<'_>> {
        let cmp = sort_mode::comparator(self.sort_mode, mode)?;
        let (lower, upper) = search::find_entry(self.index.as_bytes(), cmp, text, 0, self.index.len())?;
        Some(Cursor::new(self, lower, upper))
    }

    /// Looks up the dictionary's human-readable name, stored as the article of a pseudo-headword.
    pub fn name(&self) -> Option<String> {
        let index = self.index.as_bytes();
        let interval = search::find_entry(index, cmp::strcmp, b"00-database-short", 0, index.len())
            .or_else(|| search::find_entry(index, cmp::strcmp, b"00databaseshort", 0, index.len()))?;

        let line = parsing::parse_line(index, interval.0, interval.1)?;
        let article = self.read_article(line.article_offset, line.article_length).ok()?;

        let first_line_end = article.iter().position(|&b| b == b'\n').unwrap_or(article.len());
        let first_line = &article[..first_line_end];

        if first_line == b"00-database-short" || first_line == b"00databaseshort" {
            let rest_start = (first_line_end + 1).min(article.len());
            let rest = &article[rest_start..];
            let trimmed = {
                let mut i = 0;
                while i < rest.len() && rest[i].is_ascii_whitespace() {
                    i += 1;
                }
                &rest[i..]
            };
            let second_line_end = trimmed.iter().position(|&b| b == b'\n').unwrap_or(trimmed.len());
            Some(String::from_utf8_lossy(&trimmed[..second_line_end]).into_owned())
        } else {
            Some(String::from_utf8_lossy(&article).into_owned())
        }
    }
}
