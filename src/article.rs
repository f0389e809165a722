//! Article payload ownership.
//!
//! An article either borrows straight out of the memory-mapped data file (the uncompressed
//! case) or owns a freshly decompressed buffer (the dictzip case). Rather than carry a boolean
//! flag alongside a raw pointer, as the reference implementation does, this is a small sum type
//! callers can treat uniformly through `Deref<Target = [u8]>`.
use std::ops::Deref;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum Article<'a> {
    Borrowed(&'a [u8]),
    Owned(Rc<[u8]>),
}

impl<'a> Deref for Article<'a> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Article::Borrowed(bytes) => bytes,
            Article::Owned(bytes) => bytes,
        }
    }
}

impl<'a> PartialEq<[u8]> for Article<'a> {
    fn eq(&self, other: &[u8]) -> bool {
        self.deref() == other
    }
}

impl<'a> PartialEq<&[u8]> for Article<'a> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.deref() == *other
    }
}
