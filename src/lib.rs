//! sortbox - organize a folder into category subdirectories
//!
//! This library classifies a folder's top-level files by extension into
//! category subdirectories (optionally sub-bucketed by last-modified month),
//! compresses oversized files in place, and supports a single-level undo.
//! The engine is headless; the interactive session in [`cli`] supplies the
//! prompts, progress bar and translated messages.

pub mod archive;
pub mod category;
pub mod cli;
pub mod lang;
pub mod organizer;
pub mod output;
pub mod settings;
pub mod undo;

pub use category::CategoryTable;
pub use organizer::{
    CredentialGate, OpenGate, OrganizeError, OrganizeOptions, OrganizeOutcome, UndoRecord,
    organize, preview, write_report,
};
pub use settings::{Language, Settings};
pub use undo::{UndoEngine, UndoReport};
