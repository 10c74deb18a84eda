pub type FileResult<T> = Result<T, FileError>;

/// Failures while loading the original file or saving the document.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("no file '{}' found", .0.display())]
    NotFound(std::path::PathBuf),

    #[error("path '{}' is a directory, please provide a path to a file", .0.display())]
    IsDirectory(std::path::PathBuf),

    #[error("file '{}' is not a regular file", .0.display())]
    NotRegularFile(std::path::PathBuf),

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("failed to save '{}': {source}", path.display())]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl FileError {
    pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        FileError::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &std::path::Path, source: std::io::Error) -> Self {
        FileError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}
