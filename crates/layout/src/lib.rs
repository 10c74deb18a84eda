//! Screen geometry: where the cursor lands once long lines wrap and the
//! view scrolls.

pub mod viewport;

/// Columns reserved left of the text for line numbers.
pub const GUTTER_WIDTH: usize = 8;

/// How far the cursor may drift from the middle text row before the view
/// scrolls.
pub const SCROLL_BAND: usize = 5;

/// Rows reserved at the bottom for the status line.
pub const STATUS_ROWS: usize = 1;
