use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::alignment::{AlignmentTable, Column, Selection, ShiftPlan};
use crate::errors::AppError;
use crate::subtitle_document::SubtitleDocument;

// @module: Editing session owning the table and both documents

/// One editing session: a shared alignment table plus the good and bad files projected into it
#[derive(Debug, Default)]
pub struct Session {
    table: AlignmentTable,
    good: SubtitleDocument,
    bad: SubtitleDocument,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session whose documents back up with the given suffix
    pub fn with_backup_suffix(suffix: &str) -> Self {
        Self {
            table: AlignmentTable::new(),
            good: SubtitleDocument::with_backup_suffix(suffix),
            bad: SubtitleDocument::with_backup_suffix(suffix),
        }
    }

    pub fn table(&self) -> &AlignmentTable {
        &self.table
    }

    pub fn document(&self, column: Column) -> &SubtitleDocument {
        match column {
            Column::Good => &self.good,
            Column::Bad => &self.bad,
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.good.is_dirty() || self.bad.is_dirty()
    }

    /// Load `path` into `column` of the table and bind it to that column's document
    ///
    /// A file that fails to load leaves the previous binding in place.
    pub fn open<P: AsRef<Path>>(&mut self, column: Column, path: P) -> Result<(), AppError> {
        let document = match column {
            Column::Good => &mut self.good,
            Column::Bad => &mut self.bad,
        };
        document.open(path, &mut self.table, column)?;
        Ok(())
    }

    /// Move the selection into the good column
    pub fn copy_to_good(&mut self, selection: &Selection) -> Result<ShiftPlan, AppError> {
        let plan = self.table.copy_to_good(selection)?;
        self.good.mark_dirty();
        Ok(plan)
    }

    /// Move the selection into the bad column
    pub fn copy_to_bad(&mut self, selection: &Selection) -> Result<ShiftPlan, AppError> {
        let plan = self.table.copy_to_bad(selection)?;
        self.bad.mark_dirty();
        Ok(plan)
    }

    /// Merge the selected bad-column rows into one
    pub fn merge(&mut self, selection: &Selection) -> Result<(), AppError> {
        self.table.merge(selection)?;
        self.bad.mark_dirty();
        Ok(())
    }

    /// Save every document with unsaved changes, good first
    ///
    /// Stops at the first failure; documents already written stay saved.
    pub fn save(&mut self) -> Result<Vec<PathBuf>, AppError> {
        let mut saved = Vec::new();

        for column in [Column::Good, Column::Bad] {
            if !self.document(column).is_dirty() {
                continue;
            }
            if self.document(column).path().is_none() {
                warn!("The {} column changed but no {} file is open, skipping", column, column);
                continue;
            }

            let table = &self.table;
            let document = match column {
                Column::Good => &mut self.good,
                Column::Bad => &mut self.bad,
            };
            let path = document.save(table, column)?;
            info!("File {} saved successfully", path.display());
            saved.push(path);
        }

        Ok(saved)
    }
}
