/*!
 * Tests for subtitle line classification and the line model
 */

use anyhow::Result;
use subtrans::subtitle_processor::{SubtitleFile, SubtitleLine, is_translatable, split_lines};
use crate::common;

/// Test that empty lines are structural
#[test]
fn test_is_translatable_withEmptyLine_shouldReturnFalse() {
    assert!(!is_translatable(""));
    assert!(!is_translatable("   "));
    assert!(!is_translatable("\t"));
}

/// Test that sequence index lines are structural
#[test]
fn test_is_translatable_withSequenceIndex_shouldReturnFalse() {
    assert!(!is_translatable("42"));
    assert!(!is_translatable("1"));
    assert!(!is_translatable("  1024  "));
}

/// Test that timecode range lines are structural
#[test]
fn test_is_translatable_withTimecodeRange_shouldReturnFalse() {
    assert!(!is_translatable("00:00:01,000 --> 00:00:04,000"));
    // Any line containing the separator is structural, regardless of shape
    assert!(!is_translatable("broken --> line"));
}

/// Test that prose lines are translatable
#[test]
fn test_is_translatable_withProse_shouldReturnTrue() {
    assert!(is_translatable("Hello world"));
    assert!(is_translatable("- What?"));
    // Mixed digits and text are not a sequence index
    assert!(is_translatable("Route 66"));
}

/// Test that classification ignores surrounding whitespace
#[test]
fn test_is_translatable_withSurroundingWhitespace_shouldMatchTrimmed() {
    for line in ["Hello world", "42", "00:00:01,000 --> 00:00:04,000", "x"] {
        let padded = format!("  \t{}  \r", line);
        assert_eq!(is_translatable(&padded), is_translatable(line.trim()));
    }
}

/// Test that split_lines keeps each line's own terminator
#[test]
fn test_split_lines_withMixedTerminators_shouldPreserveThem() {
    let lines = split_lines("1\r\nHello\nlast");

    assert_eq!(
        lines,
        vec![
            SubtitleLine::new("1", "\r\n"),
            SubtitleLine::new("Hello", "\n"),
            SubtitleLine::new("last", ""),
        ]
    );
}

/// Test that concatenating split lines reproduces the input
#[test]
fn test_split_lines_withAnyInput_shouldRoundTrip() {
    let content = "1\r\n00:00:01,000 --> 00:00:04,000\r\nHello\r\n\r\n2\nWorld\n";
    let rejoined: String = split_lines(content).iter().map(|l| l.to_string()).collect();

    assert_eq!(rejoined, content);
}

/// Test that a final unterminated line still gets a newline when replaced
#[test]
fn test_terminator_or_newline_withUnterminatedLine_shouldReturnNewline() {
    assert_eq!(SubtitleLine::new("Hello", "").terminator_or_newline(), "\n");
    assert_eq!(SubtitleLine::new("Hello", "\r\n").terminator_or_newline(), "\r\n");
}

/// Test reading a subtitle file from disk
#[test]
fn test_read_withValidFile_shouldLoadAllLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(&temp_dir.path().to_path_buf(), "sample.srt")?;

    let subtitle = SubtitleFile::read(&path)?;

    assert_eq!(subtitle.source_file, path);
    // 3 entries of 3 lines each, separated by blank lines
    assert_eq!(subtitle.line_count(), 11);
    assert!(is_translatable(&subtitle.lines[2].text));
    assert!(!is_translatable(&subtitle.lines[1].text));

    Ok(())
}

/// Test that reading a missing file fails
#[test]
fn test_read_withMissingFile_shouldReturnError() {
    assert!(SubtitleFile::read("does_not_exist.srt").is_err());
}
