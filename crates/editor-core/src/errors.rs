pub type TextBufferResult<T> = Result<T, TextBufferError>;

#[derive(Debug, thiserror::Error)]
pub enum TextBufferError {
    #[error(transparent)]
    File(#[from] io::errors::FileError),

    #[error(transparent)]
    Math(#[from] crate::enums::MathError),

    /// A line grew past what the line index can store.
    #[error(
        "line-length overflow: line {} is {len} bytes long (max line-length is {max})",
        .line + 1,
        max = crate::line_index::MAX_LINE_LEN
    )]
    LineTooLong { line: usize, len: usize },

    #[error("no file path associated with this buffer")]
    NoFilePath,
}
