//! Positional edit commands and the batch applier
//!
//! An [`EditCommand`] describes one contiguous edit against the *original*
//! content's index space: delete `delete_count` elements starting at
//! `position`, then insert optional replacement content at the same spot.
//! [`apply_commands`] applies a whole batch of mutually non-overlapping
//! commands in one reconstruction pass, so no command ever observes offsets
//! shifted by another.

use crate::content::Content;
use crate::error::{FixError, FixResult};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One contiguous edit: replace `delete_count` elements at `position` with
/// optional `insert` content.
///
/// Offsets count elements of the target container: bytes for `String` and
/// `Vec<u8>` content, items for token vectors. Position `0` is before the
/// first element; position `length` is after the last, so a pure insertion
/// there appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCommand<C> {
    position: usize,
    delete_count: usize,
    insert: Option<C>,
}

impl<C: Content> EditCommand<C> {
    /// Replace `delete_count` elements at `position` with `content`.
    pub fn replace(position: usize, delete_count: usize, content: C) -> Self {
        Self {
            position,
            delete_count,
            insert: Some(content),
        }
    }

    /// Insert `content` at `position` without removing anything.
    pub fn insert(position: usize, content: C) -> Self {
        Self {
            position,
            delete_count: 0,
            insert: Some(content),
        }
    }

    /// Delete `delete_count` elements starting at `position`.
    pub fn delete(position: usize, delete_count: usize) -> Self {
        Self {
            position,
            delete_count,
            insert: None,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn delete_count(&self) -> usize {
        self.delete_count
    }

    pub fn insert_content(&self) -> Option<&C> {
        self.insert.as_ref()
    }

    /// Half-open range of the original content this command modifies.
    ///
    /// Saturates at `usize::MAX`; [`apply_commands`] rejects commands whose
    /// true end would overflow before they reach any content.
    pub fn range(&self) -> Range<usize> {
        self.position..self.position.saturating_add(self.delete_count)
    }

    /// Check whether two commands try to modify the same elements.
    ///
    /// Ranges are compared as half-open intervals, so adjacent edits
    /// (`0..2` and `2..4`) do not conflict. Two deliberate exceptions for
    /// zero-length insertions:
    ///
    /// - two insertions at the same position conflict, because the output
    ///   would depend on which one runs first;
    /// - an insertion at `p` does *not* conflict with a deletion or
    ///   replacement starting at `p`: the inserted content lands before the
    ///   removed span either way, so the outcome is unambiguous. An insertion
    ///   strictly inside another command's range still conflicts.
    ///
    /// Symmetric: `a.overlaps(&b) == b.overlaps(&a)`.
    pub fn overlaps(&self, other: &Self) -> bool {
        let this = self.range();
        let that = other.range();
        (this.start < that.end && that.start < this.end)
            || (this.start == that.start && self.delete_count == 0 && other.delete_count == 0)
    }

    /// Range end with overflow detection, for bounds validation.
    fn end_checked(&self) -> FixResult<usize> {
        self.position
            .checked_add(self.delete_count)
            .ok_or(FixError::RangeOverflow {
                position: self.position,
                delete_count: self.delete_count,
            })
    }
}

/// Apply a batch of mutually non-overlapping commands to `content`,
/// producing new content.
///
/// All validation happens before any output is built: if any two commands
/// overlap or any command reaches past the end of `content`, the whole batch
/// fails and nothing is applied. Input order is irrelevant; commands are
/// stable-sorted by range internally, so the result is a pure function of
/// `(content, set of commands)`.
pub fn apply_commands<C: Content>(content: &C, commands: &[EditCommand<C>]) -> FixResult<C> {
    for (idx, one) in commands.iter().enumerate() {
        for other in &commands[idx + 1..] {
            if one.overlaps(other) {
                let (first, second) = (one.range(), other.range());
                return Err(FixError::OverlappingCommands {
                    first_start: first.start,
                    first_end: first.end,
                    second_start: second.start,
                    second_end: second.end,
                });
            }
        }
    }

    let length = content.length();
    for command in commands {
        let end = command.end_checked()?;
        if end > length {
            return Err(FixError::RangeOutOfBounds {
                start: command.position,
                end,
                length,
            });
        }
    }

    let mut sorted: Vec<&EditCommand<C>> = commands.iter().collect();
    sorted.sort_by_key(|command| (command.position, command.position + command.delete_count));

    // Walk the sorted commands, preserving the complement ranges between
    // them. For length 10 with one edit at 4..6 that means keeping 0..4 and
    // 6..10, with the edit's insert content interleaved in between. Sorting
    // plus non-overlap guarantees the cursor never passes the next start
    // (same-point insert-then-delete lands here with an empty complement).
    let mut chunks: Vec<C> = Vec::with_capacity(2 * sorted.len() + 1);
    let mut cursor = 0;
    for command in &sorted {
        chunks.push(content.slice(cursor..command.position)?);
        if let Some(insert) = &command.insert {
            chunks.push(insert.clone());
        }
        cursor = command.position + command.delete_count;
    }
    chunks.push(content.slice(cursor..length)?);

    Ok(C::concat(chunks))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<String> {
        s.chars().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_overlap_overlapping_replacements() {
        let one: EditCommand<String> = EditCommand::replace(0, 2, "xx".into());
        let other = EditCommand::replace(1, 2, "yy".into());
        assert!(one.overlaps(&other));
        assert!(other.overlaps(&one));
    }

    #[test]
    fn test_overlap_distinct_replacements() {
        let one: EditCommand<String> = EditCommand::replace(0, 2, "xx".into());
        let other = EditCommand::replace(5, 2, "yy".into());
        assert!(!one.overlaps(&other));
        assert!(!other.overlaps(&one));
    }

    #[test]
    fn test_overlap_adjacent_replacements() {
        let one: EditCommand<String> = EditCommand::replace(0, 2, "xx".into());
        let other = EditCommand::replace(2, 2, "yy".into());
        assert!(!one.overlaps(&other));
        assert!(!other.overlaps(&one));
    }

    #[test]
    fn test_overlap_same_position_insertions() {
        // Outcome would depend on execution order, so this is a conflict
        let one: EditCommand<String> = EditCommand::insert(1, "*".into());
        let other = EditCommand::insert(1, "?".into());
        assert!(one.overlaps(&other));
        assert!(other.overlaps(&one));
    }

    #[test]
    fn test_overlap_same_position_insertion_and_deletion() {
        // Insertion lands before the deleted span regardless of order
        let one: EditCommand<String> = EditCommand::insert(1, "*".into());
        let other = EditCommand::delete(1, 1);
        assert!(!one.overlaps(&other));
        assert!(!other.overlaps(&one));
    }

    #[test]
    fn test_overlap_insertion_within_replacement() {
        let one: EditCommand<String> = EditCommand::insert(1, "*".into());
        let other = EditCommand::replace(0, 2, "yy".into());
        assert!(one.overlaps(&other));
        assert!(other.overlaps(&one));
    }

    #[test]
    fn test_overlap_adjacent_deletion_then_insertion() {
        let one: EditCommand<String> = EditCommand::delete(0, 1);
        let other = EditCommand::insert(1, "*".into());
        assert!(!one.overlaps(&other));
        assert!(!other.overlaps(&one));
    }

    #[test]
    fn test_overlap_same_place_deletions() {
        let one: EditCommand<String> = EditCommand::delete(0, 1);
        let other = EditCommand::delete(0, 1);
        assert!(one.overlaps(&other));
        assert!(other.overlaps(&one));
    }

    #[test]
    fn test_apply_insert() {
        let content = "abcdef".to_string();
        let commands = vec![EditCommand::insert(2, "!".to_string())];
        assert_eq!(apply_commands(&content, &commands).unwrap(), "ab!cdef");
    }

    #[test]
    fn test_apply_delete() {
        let content = "abcdef".to_string();
        let commands = vec![EditCommand::delete(2, 1)];
        assert_eq!(apply_commands(&content, &commands).unwrap(), "abdef");
    }

    #[test]
    fn test_apply_replace() {
        let content = "abcdef".to_string();
        let commands = vec![EditCommand::replace(2, 1, "C".to_string())];
        assert_eq!(apply_commands(&content, &commands).unwrap(), "abCdef");
    }

    #[test]
    fn test_apply_replace_shorter_with_longer() {
        let content = "abcdef".to_string();
        let commands = vec![EditCommand::replace(1, 1, "BBB".to_string())];
        assert_eq!(apply_commands(&content, &commands).unwrap(), "aBBBcdef");
    }

    #[test]
    fn test_apply_replace_longer_with_shorter() {
        let content = "abcdef".to_string();
        let commands = vec![EditCommand::replace(1, 4, "-".to_string())];
        assert_eq!(apply_commands(&content, &commands).unwrap(), "a-f");
    }

    #[test]
    fn test_apply_append_at_end() {
        let content = "abcdef".to_string();
        let commands = vec![EditCommand::insert(6, "!".to_string())];
        assert_eq!(apply_commands(&content, &commands).unwrap(), "abcdef!");
    }

    #[test]
    fn test_apply_multiple() {
        let content = "abcdef".to_string();
        let commands = vec![
            EditCommand::replace(1, 1, "?".to_string()),
            EditCommand::replace(5, 1, "*".to_string()),
        ];
        assert_eq!(apply_commands(&content, &commands).unwrap(), "a?cde*");
    }

    #[test]
    fn test_apply_order_does_not_matter() {
        let content = "abcdef".to_string();
        let forward = vec![
            EditCommand::replace(1, 1, "?".to_string()),
            EditCommand::insert(3, "!".to_string()),
            EditCommand::delete(4, 1),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            apply_commands(&content, &forward).unwrap(),
            apply_commands(&content, &reversed).unwrap(),
        );
    }

    #[test]
    fn test_apply_empty_commands_is_identity() {
        let content = "abcdef".to_string();
        let commands: Vec<EditCommand<String>> = Vec::new();
        assert_eq!(apply_commands(&content, &commands).unwrap(), content);
    }

    #[test]
    fn test_apply_insertion_at_deletion_start() {
        // Non-conflicting by the asymmetric rule: insert lands before the
        // deleted span
        let content = "abcdef".to_string();
        let commands = vec![
            EditCommand::insert(2, "!".to_string()),
            EditCommand::delete(2, 2),
        ];
        assert_eq!(apply_commands(&content, &commands).unwrap(), "ab!ef");
    }

    #[test]
    fn test_apply_token_content() {
        let content = tokens("example");
        let commands = vec![
            EditCommand::replace(1, 1, vec!["X".to_string()]),
            EditCommand::insert(7, vec!["!".to_string()]),
        ];
        assert_eq!(
            apply_commands(&content, &commands).unwrap(),
            vec!["e", "X", "a", "m", "p", "l", "e", "!"]
        );
    }

    #[test]
    fn test_apply_byte_content() {
        let content = b"abcdef".to_vec();
        let commands = vec![EditCommand::replace(2, 1, b"C".to_vec())];
        assert_eq!(apply_commands(&content, &commands).unwrap(), b"abCdef");
    }

    #[test]
    fn test_apply_rejects_overlap() {
        let content = "abcdef".to_string();
        let commands = vec![
            EditCommand::replace(0, 3, "x".to_string()),
            EditCommand::replace(2, 3, "y".to_string()),
        ];
        let err = apply_commands(&content, &commands).unwrap_err();
        assert!(matches!(err, FixError::OverlappingCommands { .. }));
    }

    #[test]
    fn test_apply_rejects_out_of_bounds() {
        let content = "abcdef".to_string();
        let commands = vec![EditCommand::delete(5, 2)];
        let err = apply_commands(&content, &commands).unwrap_err();
        assert!(matches!(
            err,
            FixError::RangeOutOfBounds {
                start: 5,
                end: 7,
                length: 6
            }
        ));
    }

    #[test]
    fn test_apply_rejects_overflowing_range() {
        let content = "abcdef".to_string();
        let commands = vec![EditCommand::delete(usize::MAX, 2)];
        let err = apply_commands(&content, &commands).unwrap_err();
        assert!(matches!(err, FixError::RangeOverflow { .. }));
    }

    #[test]
    fn test_apply_rejects_mid_codepoint_offset() {
        // \u{00e9} spans bytes 3..5; cutting at byte 4 is invalid
        let content = "caf\u{00e9}".to_string();
        let commands = vec![EditCommand::delete(4, 1)];
        let err = apply_commands(&content, &commands).unwrap_err();
        assert!(matches!(err, FixError::CharBoundary { offset: 4 }));
    }

    #[test]
    fn test_apply_never_mutates_input() {
        let content = "abcdef".to_string();
        let commands = vec![EditCommand::delete(0, 6)];
        let output = apply_commands(&content, &commands).unwrap();
        assert_eq!(output, "");
        assert_eq!(content, "abcdef");
    }

    #[test]
    fn test_command_serde_round_trip() {
        let command: EditCommand<String> = EditCommand::replace(2, 1, "C".into());
        let json = serde_json::to_string(&command).unwrap();
        let back: EditCommand<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
    }
}
