//! Turns the document and viewport into screen rows, and owns the terminal.

pub mod frame;
pub mod terminal;
