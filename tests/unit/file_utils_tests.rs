/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use subtrans::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(&temp_dir.path().to_path_buf(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(test_file.to_str().unwrap()));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("test_subdir");

    FileManager::ensure_dir(test_subdir.to_str().unwrap())?;

    assert!(test_subdir.exists());
    assert!(test_subdir.is_dir());

    Ok(())
}

/// Test output name derivation when the source carries a language code
#[test]
fn test_translated_file_name_withLanguageSuffix_shouldReplaceIt() {
    let name = FileManager::translated_file_name(Path::new("/tmp/input/movie.en.srt"), "bg");
    assert_eq!(name, "movie.bg.srt");
}

/// Test output name derivation from a bare extension
#[test]
fn test_translated_file_name_withBareExtension_shouldAppendMarker() {
    let name = FileManager::translated_file_name(Path::new("movie.srt"), "bg");
    assert_eq!(name, "movie.bg.srt");
}

/// Test that a name already carrying the marker maps onto itself
#[test]
fn test_translated_file_name_withTargetSuffix_shouldBeStable() {
    let name = FileManager::translated_file_name(Path::new("movie.bg.srt"), "bg");
    assert_eq!(name, "movie.bg.srt");
}

/// Test the translated-suffix skip check
#[test]
fn test_is_already_translated_withMarkerSuffix_shouldReturnTrue() {
    assert!(FileManager::is_already_translated(Path::new("movie.bg.srt"), "bg"));
    assert!(!FileManager::is_already_translated(Path::new("movie.en.srt"), "bg"));
    assert!(!FileManager::is_already_translated(Path::new("movie.srt"), "bg"));
}

/// Test that an empty output root writes beside the source
#[test]
fn test_mirrored_output_dir_withEmptyRoot_shouldUseSourceDir() {
    let dir = FileManager::mirrored_output_dir("", Path::new("shows/s01"), Path::new("shows"));
    assert_eq!(dir, Path::new("shows/s01"));
}

/// Test that a configured output root mirrors the relative source tree
#[test]
fn test_mirrored_output_dir_withRoot_shouldMirrorRelativeTree() {
    let dir = FileManager::mirrored_output_dir("bg", Path::new("shows/s01"), Path::new("shows"));
    assert_eq!(dir, Path::new("bg/s01"));

    // Scanning the root itself lands directly in the output root
    let dir = FileManager::mirrored_output_dir("bg", Path::new("shows"), Path::new("shows"));
    assert_eq!(dir, Path::new("bg"));
}

/// Test recursive discovery of subtitle files
#[test]
fn test_find_files_withNestedTree_shouldFindAllSrtFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    fs::create_dir_all(root.join("sub/deeper"))?;
    common::create_test_file(&root, "a.srt", "1\n")?;
    common::create_test_file(&root.join("sub"), "b.SRT", "1\n")?;
    common::create_test_file(&root.join("sub/deeper"), "c.srt", "1\n")?;
    common::create_test_file(&root, "notes.txt", "not a subtitle")?;

    let mut found = FileManager::find_files(&root, "srt")?;
    found.sort();

    assert_eq!(found.len(), 3);
    assert!(found.iter().all(|p| p.extension().unwrap().to_string_lossy().eq_ignore_ascii_case("srt")));

    Ok(())
}

/// Test that atomic writes create missing directories and land the content
#[test]
fn test_write_atomic_withMissingParent_shouldCreateDirsAndWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out/nested/movie.bg.srt");

    FileManager::write_atomic(&target, "1\nHello\n")?;

    assert!(target.exists());
    assert_eq!(fs::read_to_string(&target)?, "1\nHello\n");

    Ok(())
}
