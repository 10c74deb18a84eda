use std::io::Write;

/// Writes `chunks` to `path` atomically and returns the number of bytes written.
///
/// The bytes go to a temporary file in the target's directory, which is
/// synced and then renamed over `path`. An empty iterator yields a
/// zero-byte file, so nothing of the previous content survives. Renaming
/// instead of writing in place keeps an existing mapping of the old file
/// valid.
///
/// # Errors
///
/// Returns [`crate::errors::FileError::Write`] if the temporary file cannot
/// be created, written, synced or renamed.
pub fn write_atomic<'a, I>(path: &std::path::Path, chunks: I) -> crate::errors::FileResult<usize>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let wrap = |err: std::io::Error| crate::errors::FileError::write(path, err);
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => std::path::Path::new("."),
    };
    let mut temp_save_file = tempfile::Builder::new()
        .prefix(".fred_save_")
        .tempfile_in(parent_dir)
        .map_err(wrap)?;
    let mut written = 0usize;

    for chunk in chunks {
        temp_save_file.write_all(chunk).map_err(wrap)?;
        written += chunk.len();
    }

    temp_save_file.as_file().sync_all().map_err(wrap)?;

    // Temporary files are created owner-only; keep whatever the target had.
    if let Ok(metadata) = std::fs::metadata(path) {
        std::fs::set_permissions(temp_save_file.path(), metadata.permissions()).map_err(wrap)?;
    }

    temp_save_file.persist(path).map_err(|err| wrap(err.error))?;

    tracing::info!(path = %path.display(), bytes = written, "saved file");

    Ok(written)
}
