//! Content abstraction for the edit engine
//!
//! The applier is one generic algorithm rather than a copy per container
//! type: everything it needs from the content (length, slicing,
//! concatenation) is injected through the [`Content`] trait. Strings are
//! indexed by byte offset with UTF-8 boundary validation; vectors cover both
//! raw bytes and arbitrary token sequences.

use crate::error::{FixError, FixResult};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A sliceable, concatenatable sequence of elements that edit commands
/// operate on.
///
/// Implementations never mutate in place; `slice` produces an owned chunk and
/// `concat` reassembles chunks into a new value.
pub trait Content: Clone {
    /// Number of elements, in the same units as command offsets
    /// (bytes for `String` and `Vec<u8>`, items for token vectors).
    fn length(&self) -> usize;

    /// Extract an owned copy of the given half-open range.
    fn slice(&self, range: Range<usize>) -> FixResult<Self>;

    /// Combine chunks, in order, into a single value.
    fn concat(chunks: Vec<Self>) -> Self;
}

impl Content for String {
    fn length(&self) -> usize {
        self.len()
    }

    fn slice(&self, range: Range<usize>) -> FixResult<Self> {
        // is_char_boundary is false past the end too, so an out-of-range
        // offset surfaces here rather than panicking.
        for offset in [range.start, range.end] {
            if !self.is_char_boundary(offset) {
                return Err(FixError::CharBoundary { offset });
            }
        }
        Ok(self[range].to_string())
    }

    fn concat(chunks: Vec<Self>) -> Self {
        let mut out = String::with_capacity(chunks.iter().map(String::len).sum());
        for chunk in chunks {
            out.push_str(&chunk);
        }
        out
    }
}

impl<T: Clone> Content for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }

    fn slice(&self, range: Range<usize>) -> FixResult<Self> {
        let length = self.len();
        self.get(range.clone())
            .map(<[T]>::to_vec)
            .ok_or(FixError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                length,
            })
    }

    fn concat(chunks: Vec<Self>) -> Self {
        let mut out = Vec::with_capacity(chunks.iter().map(Vec::len).sum());
        for chunk in chunks {
            out.extend(chunk);
        }
        out
    }
}

/// Discriminant for [`Representation`] variants, used by fixers to reject
/// content of the wrong kind before any bundle is considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepresentationKind {
    Bytes,
    Text,
    Tokens,
}

/// A content buffer tagged with its container kind.
///
/// This is the subject a fixer edits; the caller owns it before and after
/// fixing and the fixer swaps in the edited value on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Representation {
    Bytes(Vec<u8>),
    Text(String),
    Tokens(Vec<String>),
}

impl Representation {
    pub fn kind(&self) -> RepresentationKind {
        match self {
            Representation::Bytes(_) => RepresentationKind::Bytes,
            Representation::Text(_) => RepresentationKind::Text,
            Representation::Tokens(_) => RepresentationKind::Tokens,
        }
    }

    /// Element count of the underlying container.
    pub fn length(&self) -> usize {
        match self {
            Representation::Bytes(bytes) => bytes.len(),
            Representation::Text(text) => text.len(),
            Representation::Tokens(tokens) => tokens.len(),
        }
    }
}

/// Content types that can live inside a [`Representation`].
///
/// Each implementation claims one [`RepresentationKind`]; a
/// [`crate::fixer::Fixer`] parameterized over the type checks that claim once
/// on entry instead of inspecting runtime types per bundle.
pub trait Represented: Content {
    const KIND: RepresentationKind;

    /// Borrow the content out of a subject of the matching kind.
    fn peek(subject: &Representation) -> Option<&Self>;

    /// Write edited content back into the subject.
    fn store(self, subject: &mut Representation);
}

impl Represented for Vec<u8> {
    const KIND: RepresentationKind = RepresentationKind::Bytes;

    fn peek(subject: &Representation) -> Option<&Self> {
        match subject {
            Representation::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    fn store(self, subject: &mut Representation) {
        *subject = Representation::Bytes(self);
    }
}

impl Represented for String {
    const KIND: RepresentationKind = RepresentationKind::Text;

    fn peek(subject: &Representation) -> Option<&Self> {
        match subject {
            Representation::Text(text) => Some(text),
            _ => None,
        }
    }

    fn store(self, subject: &mut Representation) {
        *subject = Representation::Text(self);
    }
}

impl Represented for Vec<String> {
    const KIND: RepresentationKind = RepresentationKind::Tokens;

    fn peek(subject: &Representation) -> Option<&Self> {
        match subject {
            Representation::Tokens(tokens) => Some(tokens),
            _ => None,
        }
    }

    fn store(self, subject: &mut Representation) {
        *subject = Representation::Tokens(self);
    }
}
