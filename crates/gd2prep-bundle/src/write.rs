//! Atomic file output.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::BundleError;

/// Write `bytes` to `path` via a temporary file in the same directory.
///
/// The destination either keeps its previous contents or receives the full
/// new contents. The temporary file is removed on every failure path.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), BundleError> {
    let io_err = |source: std::io::Error| BundleError::BundleWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_write_and_replace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.h");

        write_atomic(&path, b"first").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"first");

        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.h");

        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(matches!(err, BundleError::BundleWrite { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_destination_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("taken");
        fs::create_dir(&target).unwrap();

        let err = write_atomic(&target, b"data").unwrap_err();
        assert_eq!(err.code(), "GD2_003");
        // only the pre-existing directory remains, no stray temp file
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
