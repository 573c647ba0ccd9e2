use log::{debug, info};
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::alignment::{AlignmentTable, Column, SubtitleLine};
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleCollection;

// @module: One subtitle file bound to a column of the alignment table

/// Extensions accepted by `set_path`
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["srt", "ssa", "ass", "idx"];

/// Suffix appended to the base name of a file when backing it up before a save
pub const DEFAULT_BACKUP_SUFFIX: &str = "-backup";

/// In-memory state of one subtitle file
#[derive(Debug, Clone)]
pub struct SubtitleDocument {
    path: Option<PathBuf>,
    base_name: Option<PathBuf>,
    extension: Option<String>,
    dirty: bool,
    backup_suffix: String,
}

impl Default for SubtitleDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitleDocument {
    pub fn new() -> Self {
        Self::with_backup_suffix(DEFAULT_BACKUP_SUFFIX)
    }

    pub fn with_backup_suffix(suffix: &str) -> Self {
        Self {
            path: None,
            base_name: None,
            extension: None,
            dirty: false,
            backup_suffix: suffix.to_string(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Where the previous version of the file is copied on save
    pub fn backup_path(&self) -> Option<PathBuf> {
        let base_name = self.base_name.as_ref()?;
        let extension = self.extension.as_ref()?;
        Some(FileManager::backup_path(base_name, &self.backup_suffix, extension))
    }

    /// Validate the extension of `path` and bind it
    ///
    /// The dirty flag is left as it was.
    pub fn set_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SubtitleError> {
        let (base_name, extension) = Self::resolve(path.as_ref())?;
        self.bind(path.as_ref(), base_name, extension);
        Ok(())
    }

    /// Load `path` into `column` of the table and bind it once the load succeeds
    ///
    /// On failure the previously bound file stays bound, so a later save
    /// cannot write this column over a file that was never loaded.
    pub fn open<P: AsRef<Path>>(
        &mut self,
        path: P,
        table: &mut AlignmentTable,
        column: Column,
    ) -> Result<(), SubtitleError> {
        let path = path.as_ref();
        let (base_name, extension) = Self::resolve(path)?;
        Self::load_from(path, table, column)?;
        self.bind(path, base_name, extension);
        Ok(())
    }

    fn resolve(path: &Path) -> Result<(PathBuf, String), SubtitleError> {
        let (base_name, extension) = FileManager::split_extension(path)
            .ok_or_else(|| SubtitleError::InvalidFile(path.display().to_string()))?;

        let extension_lower = extension.to_lowercase();
        if !SUPPORTED_EXTENSIONS.contains(&extension_lower.as_str()) {
            return Err(SubtitleError::UnsupportedExtension(extension));
        }
        Ok((base_name, extension))
    }

    fn bind(&mut self, path: &Path, base_name: PathBuf, extension: String) {
        self.path = Some(path.to_path_buf());
        self.base_name = Some(base_name);
        self.extension = Some(extension);
    }

    /// Parse the bound file into `column` of the table
    ///
    /// Existing rows get their `column` text replaced; parsed lines past the end
    /// of the table become new rows carrying the parsed index and timing.
    pub fn load(&self, table: &mut AlignmentTable, column: Column) -> Result<(), SubtitleError> {
        let path = self.path.as_ref().ok_or(SubtitleError::NoFileSelected)?;
        Self::load_from(path, table, column)
    }

    // Nothing is written to the table unless the whole file parses
    fn load_from(path: &Path, table: &mut AlignmentTable, column: Column) -> Result<(), SubtitleError> {
        if !FileManager::file_exists(path) {
            return Err(SubtitleError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            });
        }

        let collection = SubtitleCollection::from_file(path)
            .map_err(|e| SubtitleError::Parse(format!("{:#}", e)))?;

        let existing = table.len();
        for (position, entry) in collection.entries.into_iter().enumerate() {
            match table.row_mut(position) {
                Some(row) => *row.text_mut(column) = Some(entry.text),
                None => {
                    let (good_text, bad_text) = match column {
                        Column::Good => (Some(entry.text), None),
                        Column::Bad => (None, Some(entry.text)),
                    };
                    table.push(SubtitleLine {
                        index: entry.seq_num,
                        start: entry.start,
                        end: entry.end,
                        good_text,
                        bad_text,
                    });
                }
            }
        }

        info!("Loaded {} into {} column", path.display(), column);
        debug!("Table grew from {} to {} rows", existing, table.len());
        Ok(())
    }

    /// Build the SRT text for `column`, skipping rows without text in it
    pub fn render_column(table: &AlignmentTable, column: Column) -> String {
        let mut srt = String::new();
        for row in table.rows() {
            if let Some(text) = row.text(column) {
                // Writing to a String cannot fail
                let _ = write!(srt, "{}\n{} --> {}\n{}\n\n", row.index, row.start, row.end, text);
            }
        }
        srt
    }

    /// Write `column` of the table back to the bound file
    ///
    /// The rendered text is parsed back and checked against the table before
    /// anything touches the disk; a row whose text would not survive the SRT
    /// grammar (an empty line inside a merged text) refuses the save. The
    /// previous file is then copied to the backup path. On failure the dirty
    /// flag stays set and the table is not touched.
    pub fn save(&mut self, table: &AlignmentTable, column: Column) -> Result<PathBuf, SubtitleError> {
        let path = self.path.clone().ok_or(SubtitleError::NoFileSelected)?;
        let backup = self.backup_path().ok_or(SubtitleError::NoFileSelected)?;

        let srt = Self::render_column(table, column);
        let mut collection = SubtitleCollection::new(path.clone());
        collection.entries = SubtitleCollection::parse_srt_string(&srt)
            .map_err(|e| SubtitleError::Parse(format!("{:#}", e)))?;
        Self::verify_round_trip(table, column, &collection)?;
        collection.clean_indexes();

        FileManager::copy_file(&path, &backup)
            .map_err(|source| SubtitleError::Io { path: backup.clone(), source })?;
        info!("Created backup at {}", backup.display());

        FileManager::write_to_file(&path, &collection.to_srt_string())
            .map_err(|source| SubtitleError::Io { path: path.clone(), source })?;

        self.dirty = false;
        info!("Saved {}", collection);
        Ok(path)
    }

    // Trailing whitespace and trailing empty lines are dropped by the SRT
    // grammar on purpose; anything else that differs is lost text.
    fn verify_round_trip(
        table: &AlignmentTable,
        column: Column,
        collection: &SubtitleCollection,
    ) -> Result<(), SubtitleError> {
        let rendered: Vec<(usize, &str)> = table.rows().iter().enumerate()
            .filter_map(|(position, row)| row.text(column).map(|text| (position, text)))
            .collect();

        if rendered.len() != collection.entries.len() {
            return Err(SubtitleError::Parse(format!(
                "{} rows rendered but {} entries read back",
                rendered.len(),
                collection.entries.len()
            )));
        }

        for ((position, text), entry) in rendered.into_iter().zip(&collection.entries) {
            if normalized_text(text) != entry.text {
                return Err(SubtitleError::Parse(format!(
                    "text of row {} contains an empty line and would not survive the save",
                    position + 1
                )));
            }
        }
        Ok(())
    }
}

fn normalized_text(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
