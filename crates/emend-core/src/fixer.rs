//! Fix arbitration and application
//!
//! A [`Fixer`] drives a queue of independently produced [`FixBundle`]s
//! against one content buffer. Bundles are admitted first-come-first-served:
//! a bundle that overlaps an earlier admission is skipped in full, because
//! the engine has no basis for deciding which of two colliding corrections
//! is right. The admitted bundles' commands are applied in a single pass and
//! marked applied; everything else keeps its status. Cross-bundle conflicts
//! are routine, not errors.

use crate::bundle::FixBundle;
use crate::command::{EditCommand, apply_commands};
use crate::content::{Representation, Represented};
use crate::error::{FixError, FixResult};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Terminal state of one bundle after an [`Fixer::apply_fixes`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BundleStatus {
    /// Admitted and committed; the bundle's `applied` flag is now set.
    Applied,
    /// Rejected because it overlapped an earlier admitted bundle.
    Skipped,
}

/// Per-call outcome report, parallel to the input bundle slice.
///
/// This duplicates what the bundles' `applied` flags say, as an explicit
/// value callers can consume without re-walking the bundles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixReport {
    /// Status of each bundle, in input order.
    pub statuses: Vec<BundleStatus>,
    /// Labels of applied bundles that carry one, in input order.
    pub applied: Vec<String>,
}

impl FixReport {
    pub fn applied_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|status| **status == BundleStatus::Applied)
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.statuses.len() - self.applied_count()
    }

    pub fn all_applied(&self) -> bool {
        self.skipped_count() == 0
    }
}

/// Applies fix bundles to content of one specific kind.
///
/// The expected kind is fixed by the type parameter; handing a fixer a
/// subject of any other kind fails before any bundle is looked at.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fixer<C> {
    _content: PhantomData<C>,
}

/// Fixer for raw byte buffers.
pub type ByteFixer = Fixer<Vec<u8>>;
/// Fixer for UTF-8 text, addressed by byte offset.
pub type TextFixer = Fixer<String>;
/// Fixer for generic token sequences.
pub type TokenFixer = Fixer<Vec<String>>;

impl<C: Represented> Fixer<C> {
    pub fn new() -> Self {
        Self {
            _content: PhantomData,
        }
    }

    /// Arbitrate and apply `bundles` against `subject`.
    ///
    /// Admission walks bundles in input order and rejects any bundle that
    /// overlaps an earlier admission; rejection of a later bundle never
    /// disturbs an earlier one. On success the subject holds the edited
    /// content and every admitted bundle is marked applied. On error
    /// (wrong subject kind, or malformed command ranges) nothing changes:
    /// no content write-back, no flag transitions.
    pub fn apply_fixes(
        &self,
        subject: &mut Representation,
        bundles: &mut [FixBundle<C>],
    ) -> FixResult<FixReport> {
        let content = C::peek(subject).ok_or_else(|| FixError::RepresentationMismatch {
            expected: C::KIND,
            found: subject.kind(),
        })?;

        let mut admitted: Vec<usize> = Vec::new();
        for idx in 0..bundles.len() {
            let conflicts = admitted
                .iter()
                .any(|&earlier| bundles[earlier].overlaps(&bundles[idx]));
            if !conflicts {
                admitted.push(idx);
            }
        }

        let flattened: Vec<EditCommand<C>> = admitted
            .iter()
            .flat_map(|&idx| bundles[idx].commands().iter().cloned())
            .collect();

        // Admitted bundles are internally consistent and mutually
        // non-overlapping, so this can only fail on bad ranges
        let edited = apply_commands(content, &flattened)?;
        edited.store(subject);

        let mut statuses = vec![BundleStatus::Skipped; bundles.len()];
        let mut applied = Vec::new();
        for &idx in &admitted {
            bundles[idx].mark_applied();
            statuses[idx] = BundleStatus::Applied;
            if let Some(label) = bundles[idx].label() {
                applied.push(label.to_string());
            }
        }

        Ok(FixReport { statuses, applied })
    }
}
