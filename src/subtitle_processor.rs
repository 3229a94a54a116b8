use std::fs;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::SubtitleError;

// @module: Subtitle line classification and file model

/// Decide whether a subtitle line carries translatable prose.
///
/// Structural lines are kept verbatim by the pipeline: blank separators,
/// bare sequence indexes, and timecode ranges (any line containing the
/// `-->` separator). Everything else is treated as text to translate.
/// The SRT format is interpreted loosely on purpose - there is no strict
/// grammar validation.
pub fn is_translatable(line: &str) -> bool {
    let trimmed = line.trim();

    !trimmed.is_empty()
        && !trimmed.chars().all(|c| c.is_ascii_digit())
        && !trimmed.contains("-->")
}

// @struct: Single line of a subtitle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleLine {
    // @field: Line content without its terminator
    pub text: String,

    // @field: Original terminator ("\n", "\r\n", or empty on a final unterminated line)
    pub terminator: String,
}

impl SubtitleLine {
    pub fn new(text: impl Into<String>, terminator: impl Into<String>) -> Self {
        SubtitleLine {
            text: text.into(),
            terminator: terminator.into(),
        }
    }

    /// Terminator to append after a translated replacement. A file whose last
    /// line has no terminator still gets one, matching the output of writing
    /// the translation as its own line.
    pub fn terminator_or_newline(&self) -> &str {
        if self.terminator.is_empty() {
            "\n"
        } else {
            &self.terminator
        }
    }
}

impl fmt::Display for SubtitleLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.text, self.terminator)
    }
}

/// A subtitle file read into memory, line by line, with terminators preserved
/// so structural lines can be written back byte-for-byte.
#[derive(Debug)]
pub struct SubtitleFile {
    /// Source filename
    pub source_file: PathBuf,

    /// Lines in original order
    pub lines: Vec<SubtitleLine>,
}

impl SubtitleFile {
    /// Read a subtitle file as UTF-8 text. Read once; the file is never
    /// touched again by the pipeline.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SubtitleError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Ok(SubtitleFile {
            source_file: path.to_path_buf(),
            lines: split_lines(&content),
        })
    }

    /// Number of lines, counting a final unterminated line
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Split text into lines keeping each line's own terminator, so that CRLF
/// files survive the pipeline unchanged where lines are kept verbatim.
pub fn split_lines(content: &str) -> Vec<SubtitleLine> {
    let mut lines = Vec::new();
    let bytes = content.as_bytes();
    let mut start = 0;

    for (i, byte) in bytes.iter().enumerate() {
        if *byte == b'\n' {
            let (text, terminator) = if i > start && bytes[i - 1] == b'\r' {
                (&content[start..i - 1], "\r\n")
            } else {
                (&content[start..i], "\n")
            };
            lines.push(SubtitleLine::new(text, terminator));
            start = i + 1;
        }
    }

    if start < bytes.len() {
        lines.push(SubtitleLine::new(&content[start..], ""));
    }

    lines
}
