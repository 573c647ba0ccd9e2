/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use subfixer::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

#[test]
fn test_split_extension_shouldSeparateBaseAndExtension() {
    let (base, ext) = FileManager::split_extension("/tmp/movie.en.srt").unwrap();
    assert_eq!(base, PathBuf::from("/tmp/movie.en"));
    assert_eq!(ext, "srt");

    assert!(FileManager::split_extension("/tmp/README").is_none());
    assert!(FileManager::split_extension("/tmp/trailing.").is_none());
}

#[test]
fn test_backup_path_shouldInsertSuffixBeforeExtension() {
    let backup = FileManager::backup_path(Path::new("/tmp/movie.en"), "-backup", "srt");
    assert_eq!(backup, Path::new("/tmp/movie.en-backup.srt"));
}

/// Test that read_to_string returns file content correctly
#[test]
fn test_read_to_string_withValidFile_shouldReturnContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "read.txt", "hello")?;

    assert_eq!(FileManager::read_to_string(&test_file)?, "hello");
    assert!(FileManager::read_to_string(temp_dir.path().join("missing.txt")).is_err());
    Ok(())
}

#[test]
fn test_write_to_file_shouldReplaceContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = common::create_test_file(temp_dir.path(), "target.srt", "old content that is longer")?;

    FileManager::write_to_file(&target, "new")?;

    assert_eq!(fs::read_to_string(&target)?, "new");
    assert!(FileManager::write_to_file(temp_dir.path().join("missing").join("x.srt"), "new").is_err());
    Ok(())
}

#[test]
fn test_copy_file_shouldOverwriteTarget() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "source.srt", "new")?;
    let target = common::create_test_file(temp_dir.path(), "target.srt", "old content")?;

    FileManager::copy_file(&source, &target)?;

    assert_eq!(fs::read_to_string(&target)?, "new");
    Ok(())
}

#[test]
fn test_copy_file_withMissingSource_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = FileManager::copy_file(temp_dir.path().join("nope.srt"), temp_dir.path().join("copy.srt"));

    let error = result.unwrap_err();
    assert_eq!(error.kind(), std::io::ErrorKind::NotFound);
    Ok(())
}
