//! Atomic fix bundles
//!
//! A [`FixBundle`] is one correction as a rule would emit it ("strip the
//! BOM", "quote the value"): an ordered set of edit commands that must be
//! applied together or not at all. Bundles are internally conflict-free by
//! construction; conflicts *between* bundles are the fixer's problem.

use crate::command::EditCommand;
use crate::content::Content;
use crate::error::{FixError, FixResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "RawFixBundle<C>",
    bound(deserialize = "C: Content + serde::Deserialize<'de>")
)]
pub struct FixBundle<C> {
    commands: Vec<EditCommand<C>>,
    /// Short human-readable note for reporting, e.g. the emitting rule's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default)]
    applied: bool,
}

/// Unvalidated wire form of [`FixBundle`]; deserialization funnels through
/// [`FixBundle::new`] so the internal non-overlap invariant holds for
/// deserialized bundles too.
#[derive(Deserialize)]
struct RawFixBundle<C> {
    commands: Vec<EditCommand<C>>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    applied: bool,
}

impl<C: Content> TryFrom<RawFixBundle<C>> for FixBundle<C> {
    type Error = FixError;

    fn try_from(raw: RawFixBundle<C>) -> FixResult<Self> {
        let mut bundle = FixBundle::new(raw.commands)?;
        bundle.label = raw.label;
        bundle.applied = raw.applied;
        Ok(bundle)
    }
}

impl<C: Content> FixBundle<C> {
    /// Build a bundle, rejecting it if any two of its commands overlap.
    ///
    /// An empty bundle is legal; it admits trivially and edits nothing.
    pub fn new(commands: Vec<EditCommand<C>>) -> FixResult<Self> {
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
        Ok(Self {
            commands,
            label: None,
            applied: false,
        })
    }

    /// Bundle holding a single command; cannot conflict with itself.
    pub fn single(command: EditCommand<C>) -> Self {
        Self {
            commands: vec![command],
            label: None,
            applied: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn commands(&self) -> &[EditCommand<C>] {
        &self.commands
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether a fixer has committed this bundle's edits. Starts false and
    /// only ever transitions to true.
    pub fn applied(&self) -> bool {
        self.applied
    }

    pub(crate) fn mark_applied(&mut self) {
        self.applied = true;
    }

    /// Check whether any command of this bundle overlaps any command of the
    /// other. Short-circuits on the first hit.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.commands
            .iter()
            .any(|one| other.commands.iter().any(|two| one.overlaps(two)))
    }
}
