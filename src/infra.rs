//! Infrastructure traits for abstracting filesystem access.
//!
//! Every stage of the pipeline reads and writes through [`FileSystem`], so
//! tests can substitute failing or recording implementations (for example
//! to exercise swallowed report-rotation failures).

use std::io;
use std::path::{Path, PathBuf};

/// Trait for abstracting filesystem operations.
pub trait FileSystem {
    /// Whether a path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all missing parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// List the entries of a directory, sorted by path.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Read the entire contents of a file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file, replacing it wholesale.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn test_real_filesystem_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        let fs = RealFileSystem;
        fs.write(&file_path, b"Hello, World!").unwrap();

        assert_eq!(fs.read_to_string(&file_path).unwrap(), "Hello, World!");
        assert_eq!(fs.read(&file_path).unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_real_filesystem_create_dir_all() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("a").join("b").join("c");

        let fs = RealFileSystem;
        fs.create_dir_all(&nested_path).unwrap();

        assert!(fs.exists(&nested_path));
        assert!(nested_path.is_dir());
    }

    #[test]
    fn test_real_filesystem_list_dir_is_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let fs = RealFileSystem;

        for name in ["c.png", "a.png", "b.png"] {
            fs.write(&temp_dir.path().join(name), b"x").unwrap();
        }

        let names: Vec<_> = fs
            .list_dir(temp_dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_real_filesystem_remove_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("old.html");
        let fs = RealFileSystem;

        fs.write(&path, b"<html>").unwrap();
        fs.remove_file(&path).unwrap();
        assert!(!fs.exists(&path));

        // Removing twice reports the missing file
        assert!(fs.remove_file(&path).is_err());
    }

    #[test]
    fn test_real_filesystem_read_nonexistent_file_returns_error() {
        let fs = RealFileSystem;
        let result = fs.read_to_string(Path::new("/nonexistent/file.txt"));
        assert!(result.is_err());
    }
}
