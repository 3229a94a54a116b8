use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Trailing language-code-plus-extension suffix, or bare extension
static LANG_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.\w{2}\.srt$|\.srt$").unwrap()
});

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(&normalized_ext[1..]) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    // @checks: Whether a file already carries the translated suffix marker
    pub fn is_already_translated<P: AsRef<Path>>(path: P, target_language: &str) -> bool {
        let marker = format!(".{}.srt", target_language);
        path.as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(&marker))
            .unwrap_or(false)
    }

    // @generates: Output file name for a translated subtitle
    // Strips an existing 2-letter language suffix or the bare extension
    // before appending the target marker: movie.en.srt -> movie.bg.srt,
    // movie.srt -> movie.bg.srt.
    pub fn translated_file_name<P: AsRef<Path>>(input_file: P, target_language: &str) -> String {
        let file_name = input_file
            .as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let base = LANG_SUFFIX_REGEX.replace(&file_name, "");
        format!("{}.{}.srt", base, target_language)
    }

    /// Output directory for a source directory: the source tree relative to
    /// the scan root, mirrored under the output root. An empty output root
    /// means translated files are written beside their sources.
    pub fn mirrored_output_dir(
        output_root: &str,
        source_dir: &Path,
        scan_root: &Path,
    ) -> PathBuf {
        if output_root.is_empty() {
            return source_dir.to_path_buf();
        }

        let relative = source_dir.strip_prefix(scan_root).unwrap_or(source_dir);
        Path::new(output_root).join(relative)
    }

    /// Write a string to a file atomically: the content goes to a temp file
    /// in the target directory and is renamed into place, so an interrupted
    /// run never leaves a truncated file at the output path.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        Self::ensure_dir(parent)?;

        let mut temp_file = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file in {:?}", parent))?;
        temp_file
            .write_all(content.as_bytes())
            .with_context(|| format!("Failed to write temp file for {:?}", path))?;
        temp_file.persist(path).map_err(|e| {
            anyhow::anyhow!("Failed to move temp file into place at {:?}: {}", path, e.error)
        })?;

        Ok(())
    }
}
