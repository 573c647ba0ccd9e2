use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Split a path into its base (everything before the extension) and extension
    ///
    /// Returns `None` when the final component has no extension.
    pub fn split_extension<P: AsRef<Path>>(path: P) -> Option<(PathBuf, String)> {
        let path = path.as_ref();
        let extension = path.extension()?.to_str()?.to_string();
        if extension.is_empty() {
            return None;
        }
        Some((path.with_extension(""), extension))
    }

    // @generates: Backup path next to the original, e.g. movie-backup.srt
    pub fn backup_path<P: AsRef<Path>>(base_name: P, suffix: &str, extension: &str) -> PathBuf {
        let base_name = base_name.as_ref();
        let mut file_name = base_name.as_os_str().to_os_string();
        file_name.push(suffix);
        file_name.push(".");
        file_name.push(extension);
        PathBuf::from(file_name)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write `content` to a file, replacing whatever was there
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> std::io::Result<()> {
        fs::write(path, content)
    }

    /// Copy a file from one location to another, overwriting the target
    pub fn copy_file<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> std::io::Result<u64> {
        let from = from.as_ref();
        let to = to.as_ref();

        if !from.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Source file does not exist: {:?}", from),
            ));
        }

        fs::copy(from, to)
    }
}
