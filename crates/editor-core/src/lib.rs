//! Editing core: a piece table over an immutable original buffer and an
//! append-only add buffer, the line index derived from it, and the cursor
//! logic that keeps both in step.

pub mod cursor;
pub mod enums;
pub mod errors;
pub mod line_index;
pub mod piece_table;
pub mod text;
