/// The immutable snapshot of the file as it was when the session started.
///
/// Non-empty files are memory-mapped. Empty files and scratch buffers keep
/// their bytes in memory, which also sidesteps mapping zero-length files.
#[derive(Debug)]
pub enum OriginalBuffer {
    Mapped(crate::mmap::MmapFile),
    Memory(Box<[u8]>),
}

impl Default for OriginalBuffer {
    fn default() -> Self {
        OriginalBuffer::Memory(Box::default())
    }
}

impl OriginalBuffer {
    /// Validates `path` and loads it as the original buffer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::FileError::NotFound`], `IsDirectory` or
    /// `NotRegularFile` when the path does not name a regular file, and
    /// `Read` when the metadata query, open or mapping fails.
    pub fn load(path: impl AsRef<std::path::Path>) -> crate::errors::FileResult<Self> {
        let path = path.as_ref();
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(crate::errors::FileError::NotFound(path.to_path_buf()));
            }
            Err(err) => return Err(crate::errors::FileError::read(path, err)),
        };

        if metadata.is_dir() {
            return Err(crate::errors::FileError::IsDirectory(path.to_path_buf()));
        }

        if !metadata.is_file() {
            return Err(crate::errors::FileError::NotRegularFile(
                path.to_path_buf(),
            ));
        }

        if metadata.len() == 0 {
            tracing::info!(path = %path.display(), "loaded empty file");

            return Ok(Self::default());
        }

        let mmap = crate::mmap::MmapFile::open(path)
            .map_err(|err| crate::errors::FileError::read(path, err))?;

        tracing::info!(path = %path.display(), bytes = mmap.len(), "mapped original file");

        Ok(OriginalBuffer::Mapped(mmap))
    }

    #[must_use]
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        OriginalBuffer::Memory(bytes.into())
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        match self {
            OriginalBuffer::Mapped(mmap) => mmap.as_slice(),
            OriginalBuffer::Memory(bytes) => bytes,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::OriginalBuffer;
    use crate::errors::FileError;
    use std::io::Write;

    #[test]
    fn test_load_regular_file_is_mapped() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        temp.write_all(b"hello\nworld").unwrap();
        temp.as_file().sync_all().unwrap();

        let original = OriginalBuffer::load(temp.path()).unwrap();

        assert!(matches!(original, OriginalBuffer::Mapped(_)));
        assert_eq!(original.as_slice(), b"hello\nworld");
    }

    #[test]
    fn test_load_empty_file_stays_in_memory() {
        let temp = tempfile::NamedTempFile::new().unwrap();

        let original = OriginalBuffer::load(temp.path()).unwrap();

        assert!(matches!(original, OriginalBuffer::Memory(_)));
        assert!(original.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        let err = OriginalBuffer::load(&path).unwrap_err();

        assert!(matches!(err, FileError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let err = OriginalBuffer::load(dir.path()).unwrap_err();

        assert!(matches!(err, FileError::IsDirectory(_)));
        assert!(err.to_string().contains("is a directory"));
    }

    #[test]
    fn test_from_bytes() {
        let original = OriginalBuffer::from_bytes(b"abc".to_vec());

        assert_eq!(original.len(), 3);
        assert_eq!(original.as_slice(), b"abc");
        assert!(OriginalBuffer::default().is_empty());
    }
}
