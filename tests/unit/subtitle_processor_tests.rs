/*!
 * Tests for the subtitle codec
 */

use std::fmt::Write;
use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use subfixer::subtitle_processor::{SubtitleCollection, SubtitleEntry, Timestamp};
use crate::common;

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let parsed = Timestamp::parse(ts).unwrap();
    assert_eq!(parsed.as_millis(), 5025678);
    assert_eq!(parsed.to_string(), ts);

    // A dot separator is accepted but rendered with a comma
    assert_eq!(Timestamp::parse("00:00:01.500").unwrap().to_string(), "00:00:01,500");
}

#[test]
fn test_timestamp_parsing_withInvalidComponents_shouldFail() {
    assert!(Timestamp::parse("00:61:00,000").is_err());
    assert!(Timestamp::parse("00:00:60,000").is_err());
    assert!(Timestamp::parse("00:00:00,1000").is_err());
    assert!(Timestamp::parse("00:00,000").is_err());
    assert!("aa:bb:cc,ddd".parse::<Timestamp>().is_err());
}

#[test]
fn test_timestamp_parsing_withHugeHours_shouldFailWithoutOverflow() {
    let error = Timestamp::parse("9999999999999:00:00,000").unwrap_err();
    assert!(error.to_string().contains("out of range"));

    // The only entry has an unusable timing line, so nothing is left
    let content = "1\n9999999999999:00:00,000 --> 9999999999999:00:01,000\nHi\n";
    assert!(SubtitleCollection::parse_srt_string(content).is_err());
}

/// Test subtitle entry display formatting
#[test]
fn test_subtitle_entry_display_withValidEntry_shouldFormatAsSrtBlock() {
    let entry = SubtitleEntry::new(
        3,
        Timestamp::from_millis(5000),
        Timestamp::from_millis(10000),
        "Hello\nWorld",
    );
    let mut output = String::new();
    write!(output, "{}", entry).unwrap();

    assert_eq!(output, "3\n00:00:05,000 --> 00:00:10,000\nHello\nWorld\n\n");
}

#[test]
fn test_parse_srt_string_withUnorderedIndexes_shouldKeepFileOrder() -> Result<()> {
    let content = "7\n00:00:05,000 --> 00:00:06,000\nLater\n\n3\n00:00:01,000 --> 00:00:02,000\nEarlier\n";
    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].seq_num, 7);
    assert_eq!(entries[0].text, "Later");
    assert_eq!(entries[1].seq_num, 3);
    assert_eq!(entries[1].start, Timestamp::from_millis(1000));
    Ok(())
}

#[test]
fn test_parse_srt_string_withEmptyText_shouldKeepEntry() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n\n\n2\n00:00:03,000 --> 00:00:04,000\nText\n\n";
    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text, "");
    assert_eq!(entries[1].text, "Text");
    Ok(())
}

#[test]
fn test_parse_srt_string_withBomAndCrlf_shouldParse() -> Result<()> {
    let content = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nLine one\r\nLine two\r\n\r\n";
    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].seq_num, 1);
    assert_eq!(entries[0].text, "Line one\nLine two");
    Ok(())
}

#[test]
fn test_parse_srt_string_withEmptyContent_shouldReturnNoEntries() -> Result<()> {
    assert!(SubtitleCollection::parse_srt_string("")?.is_empty());
    assert!(SubtitleCollection::parse_srt_string(" \n\n")?.is_empty());
    Ok(())
}

#[test]
fn test_parse_srt_string_withGarbage_shouldFail() {
    assert!(SubtitleCollection::parse_srt_string("this is not\na subtitle file\n").is_err());
}

#[test]
fn test_clean_indexes_shouldRenumberDensely() {
    let mut collection = SubtitleCollection::new(PathBuf::from("x.srt"));
    for seq_num in [4, 9, 10] {
        collection.entries.push(SubtitleEntry::new(seq_num, Timestamp::ZERO, Timestamp::ZERO, "t"));
    }

    collection.clean_indexes();

    let indexes: Vec<usize> = collection.entries.iter().map(|e| e.seq_num).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
}

#[test]
fn test_write_and_read_file_shouldPreserveEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out.srt");

    let mut collection = SubtitleCollection::new(path.clone());
    collection.entries.push(SubtitleEntry::new(1, Timestamp::from_millis(0), Timestamp::from_millis(1500), "Première"));
    collection.entries.push(SubtitleEntry::new(2, Timestamp::from_millis(2000), Timestamp::from_millis(3500), "Deux\nlignes"));
    collection.write_to_srt(&path)?;

    let reloaded = SubtitleCollection::from_file(&path)?;
    assert_eq!(reloaded.entries, collection.entries);
    assert_eq!(reloaded.to_srt_string(), fs::read_to_string(&path)?);
    Ok(())
}

#[test]
fn test_from_file_withLatin1Content_shouldDecodeLossily() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("latin1.srt");
    let mut bytes = b"1\n00:00:01,000 --> 00:00:02,000\nCaf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b"\n\n");
    fs::write(&path, bytes)?;

    let collection = SubtitleCollection::from_file(&path)?;
    assert_eq!(collection.entries.len(), 1);
    assert!(collection.entries[0].text.starts_with("Caf"));
    Ok(())
}
