/// # Piece Table Module.
///
/// The document is an ordered list of pieces, each one a range into either
/// the original file or the append-only add buffer.
pub mod piece;
pub mod table;

/// Initial capacity of the add buffer, in bytes.
pub const ADD_BUF_INIT_CAP: usize = 512;
/// Initial capacity of the piece list.
pub const PIECE_TABLE_INIT_CAP: usize = 56;
