use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context, anyhow};
use log::{warn, debug};

use crate::file_utils::FileManager;

// @module: Subtitle codec (SRT grammar)

// @const: SRT timing line regex
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d+:\d{2}:\d{2}[,.]\d{3})").unwrap()
});

/// A subtitle timestamp with millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse(timestamp: &str) -> Result<Self> {
        let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
        }

        let ms = hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .ok_or_else(|| anyhow!("Timestamp out of range: {}", timestamp))?;

        Ok(Timestamp(ms))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ms = self.0;
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        write!(f, "{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl FromStr for Timestamp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence number as found in the file
    pub seq_num: usize,

    pub start: Timestamp,

    pub end: Timestamp,

    // @field: Subtitle text, lines joined with '\n'
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(seq_num: usize, start: Timestamp, end: Timestamp, text: impl Into<String>) -> Self {
        SubtitleEntry {
            seq_num,
            start,
            end,
            text: text.into(),
        }
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered collection of subtitle entries read from or destined for one file
#[derive(Debug, Clone, Default)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// Entries in file order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create an empty subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Read and parse a subtitle file
    ///
    /// Content that is not valid UTF-8 is decoded lossily rather than rejected.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!("{} is not valid UTF-8, decoding lossily", path.display());
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let entries = Self::parse_srt_string(&content)
            .with_context(|| format!("Failed to parse subtitle file: {}", path.display()))?;
        debug!("Parsed {} entries from {}", entries.len(), path.display());

        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Parse SRT format string into subtitle entries
    ///
    /// Entries keep the order and sequence numbers found in the content. Entries
    /// with empty text are kept.
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        // State variables for parsing
        let mut current_seq_num: Option<usize> = None;
        let mut current_timing: Option<(Timestamp, Timestamp)> = None;
        let mut current_text: Vec<&str> = Vec::new();

        for (line_idx, line) in content.lines().enumerate() {
            let trimmed = line.trim_end();

            if trimmed.trim().is_empty() {
                if let (Some(seq_num), Some((start, end))) = (current_seq_num, current_timing) {
                    entries.push(SubtitleEntry::new(seq_num, start, end, current_text.join("\n")));
                    current_seq_num = None;
                    current_timing = None;
                    current_text.clear();
                }
                continue;
            }

            if current_seq_num.is_none() {
                match trimmed.trim().parse::<usize>() {
                    Ok(num) => current_seq_num = Some(num),
                    Err(_) => warn!("Unexpected text at line {} before sequence number: {}", line_idx + 1, trimmed),
                }
                continue;
            }

            if current_timing.is_none() {
                let timing = TIMING_REGEX.captures(trimmed.trim()).and_then(|caps| {
                    let start = Timestamp::parse(&caps[1]).ok()?;
                    let end = Timestamp::parse(&caps[2]).ok()?;
                    Some((start, end))
                });

                match timing {
                    Some(timing) => current_timing = Some(timing),
                    None => {
                        warn!("Invalid timing line at line {}: {}", line_idx + 1, trimmed);
                        current_seq_num = None;
                    }
                }
                continue;
            }

            current_text.push(trimmed);
        }

        // Add the last entry if there is one
        if let (Some(seq_num), Some((start, end))) = (current_seq_num, current_timing) {
            entries.push(SubtitleEntry::new(seq_num, start, end, current_text.join("\n")));
        }

        if entries.is_empty() {
            return Err(anyhow!("No valid subtitle entries were found in the SRT content"));
        }

        let inverted = entries.iter().filter(|e| e.end < e.start).count();
        if inverted > 0 {
            warn!("Found {} subtitle entries ending before they start", inverted);
        }

        let overlap_count = entries.windows(2).filter(|w| w[0].end > w[1].start).count();
        if overlap_count > 0 {
            warn!("Found {} overlapping subtitle entries", overlap_count);
        }

        Ok(entries)
    }

    /// Renumber entries sequentially starting at 1
    pub fn clean_indexes(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }
    }

    /// Serialize all entries to SRT text
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    /// Write subtitles to an SRT file, UTF-8 encoded
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        FileManager::write_to_file(path, &self.to_srt_string())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} entries)", self.source_file.display(), self.entries.len())
    }
}
