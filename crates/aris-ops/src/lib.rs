//! File operations for aris.
//!
//! Synchronous operations applied to a single path taken from a search or
//! analysis result: open with the default application, append text, move
//! into another directory, and delete. Interactive confirmation is left to
//! the caller; these functions only report conflicts and failures.

mod conflict;
mod delete;
mod error;
mod launch;
mod move_op;
mod text;

pub use conflict::{Conflict, ConflictKind};
pub use delete::{DeleteMode, delete};
pub use error::OperationError;
pub use launch::open_path;
pub use move_op::{move_into, resolve_folder};
pub use text::{APPENDABLE_EXTENSIONS, append_text, check_appendable, is_appendable};
