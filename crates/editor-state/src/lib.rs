//! Modal key handling on top of the editing core.

pub mod document;
pub mod input;
