//! Filesystem helpers shared by the hooks.

pub mod locking;

pub use locking::{locked_append_line, locked_merge_append};
