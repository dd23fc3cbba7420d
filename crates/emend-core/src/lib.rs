//! # emend-core
//!
//! Positional edit-command engine: range-based insert/delete/replace
//! commands over immutable content, grouped into atomic fix bundles, with
//! deterministic arbitration when independently produced bundles collide.
//!
//! The pieces, bottom up:
//! - [`EditCommand`] — one contiguous edit plus the overlap predicate every
//!   conflict check is built on
//! - [`apply_commands`] — pure batch applier over any [`Content`]
//! - [`FixBundle`] — an internally conflict-free set of commands applied
//!   atomically or not at all
//! - [`Fixer`] — first-come-first-served admission of bundles against one
//!   [`Representation`], with per-bundle outcomes in a [`FixReport`]
//!
//! Rule evaluation and file parsing live upstream; this crate only takes
//! content plus bundles and hands back new content plus statuses.
//!
//! ```
//! use emend_core::{EditCommand, FixBundle, Representation, TextFixer};
//!
//! let mut subject = Representation::Text("abcdef".into());
//! let mut bundles = vec![
//!     FixBundle::single(EditCommand::replace(0, 1, "A".to_string())),
//!     FixBundle::single(EditCommand::insert(6, "!".to_string())),
//! ];
//! let report = TextFixer::new().apply_fixes(&mut subject, &mut bundles)?;
//! assert_eq!(subject, Representation::Text("Abcdef!".into()));
//! assert!(report.all_applied());
//! # Ok::<(), emend_core::FixError>(())
//! ```

pub mod bundle;
pub mod command;
pub mod content;
pub mod error;
pub mod fixer;

pub use bundle::FixBundle;
pub use command::{EditCommand, apply_commands};
pub use content::{Content, Representation, RepresentationKind, Represented};
pub use error::{FixError, FixResult};
pub use fixer::{BundleStatus, ByteFixer, FixReport, Fixer, TextFixer, TokenFixer};
