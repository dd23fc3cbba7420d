//! Error types for command validation and fix application

use crate::content::RepresentationKind;
use thiserror::Error;

pub type FixResult<T> = Result<T, FixError>;

/// Failure modes of the edit engine.
///
/// Conflicts between independently produced, individually valid bundles are
/// not errors; they are resolved by the fixer's admission policy and reported
/// through [`crate::fixer::FixReport`]. Only malformed input reaches this
/// enum.
#[derive(Debug, Error)]
pub enum FixError {
    #[error(
        "edit commands overlap: {first_start}..{first_end} and {second_start}..{second_end}"
    )]
    OverlappingCommands {
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    },

    #[error("edit range {start}..{end} exceeds content length {length}")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        length: usize,
    },

    #[error("edit range overflows: position {position} + delete count {delete_count}")]
    RangeOverflow {
        position: usize,
        delete_count: usize,
    },

    #[error("byte offset {offset} is not a UTF-8 character boundary")]
    CharBoundary { offset: usize },

    #[error("fixer expects {expected:?} content, found {found:?}")]
    RepresentationMismatch {
        expected: RepresentationKind,
        found: RepresentationKind,
    },
}
