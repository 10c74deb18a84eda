//! File collaborators of the editor core: loading the original buffer and
//! writing the evaluated document back to disk.

pub mod errors;
pub mod mmap;
pub mod original;
pub mod save;
