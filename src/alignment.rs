/*!
 * Row-aligned view of a "good" and a "bad" subtitle file.
 *
 * The table is keyed by row position. Each row carries the shared timing and
 * an optional text per column; `None` means the column has no subtitle at that
 * row, which is different from an empty string.
 */

use log::debug;
use std::fmt;

use crate::errors::TableError;
use crate::subtitle_processor::Timestamp;

/// Which side of the table an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Good,
    Bad,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Good => write!(f, "good"),
            Column::Bad => write!(f, "bad"),
        }
    }
}

impl std::str::FromStr for Column {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "good" => Ok(Column::Good),
            "bad" => Ok(Column::Bad),
            _ => Err(anyhow::anyhow!("Invalid column: {} (expected 'good' or 'bad')", s)),
        }
    }
}

/// A non-empty, ascending, contiguous run of row positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    first: usize,
    len: usize,
}

impl Selection {
    /// Build a selection from inclusive bounds
    pub fn range(first: usize, last: usize) -> Result<Self, TableError> {
        if last < first {
            return Err(TableError::NonContiguous);
        }
        Ok(Self { first, len: last - first + 1 })
    }

    /// Build a selection from explicit positions, as a multi-row widget selection reports them
    pub fn from_positions(positions: &[usize]) -> Result<Self, TableError> {
        let (&first, rest) = positions.split_first().ok_or(TableError::EmptySelection)?;
        let mut expected = first;
        for &position in rest {
            expected += 1;
            if position != expected {
                return Err(TableError::NonContiguous);
            }
        }
        Ok(Self { first, len: positions.len() })
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn last(&self) -> usize {
        self.first + self.len - 1
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn positions(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last()
    }
}

/// One row of the alignment table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleLine {
    /// 1-based subtitle index
    pub index: usize,
    pub start: Timestamp,
    pub end: Timestamp,
    pub good_text: Option<String>,
    pub bad_text: Option<String>,
}

impl SubtitleLine {
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Good => self.good_text.as_deref(),
            Column::Bad => self.bad_text.as_deref(),
        }
    }

    pub fn text_mut(&mut self, column: Column) -> &mut Option<String> {
        match column {
            Column::Good => &mut self.good_text,
            Column::Bad => &mut self.bad_text,
        }
    }
}

/// Block of rows a copy has to push down to make room for the pasted rows
///
/// Rows `first..insertion_point` move to `first + offset..insertion_point + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftPlan {
    /// First selected position
    pub first: usize,
    /// First position at or after `first` whose target column is empty, or the table length
    pub insertion_point: usize,
    /// Number of selected rows
    pub offset: usize,
}

impl ShiftPlan {
    /// Last row that gets moved, if any
    pub fn from_position(&self) -> Option<usize> {
        if self.insertion_point > self.first {
            Some(self.insertion_point - 1)
        } else {
            None
        }
    }

    /// Last row written by the shift (or by the paste when nothing moves)
    pub fn to_position(&self) -> usize {
        self.insertion_point + self.offset - 1
    }
}

/// Ordered rows of aligned subtitles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentTable {
    rows: Vec<SubtitleLine>,
}

impl AlignmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SubtitleLine] {
        &self.rows
    }

    pub fn row(&self, position: usize) -> Option<&SubtitleLine> {
        self.rows.get(position)
    }

    pub fn row_mut(&mut self, position: usize) -> Option<&mut SubtitleLine> {
        self.rows.get_mut(position)
    }

    pub fn push(&mut self, line: SubtitleLine) {
        self.rows.push(line);
    }

    /// Number of rows holding text in `column`
    pub fn count_populated(&self, column: Column) -> usize {
        self.rows.iter().filter(|row| row.text(column).is_some()).count()
    }

    fn check_selection(&self, selection: &Selection) -> Result<(), TableError> {
        if selection.last() >= self.rows.len() {
            return Err(TableError::OutOfRange {
                position: selection.last(),
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    /// Append placeholder rows until `position` exists
    ///
    /// New rows continue the index sequence and repeat the timing of the last
    /// row; both text columns stay empty.
    pub fn ensure_rows_through(&mut self, position: usize) {
        if position < self.rows.len() {
            return;
        }

        let added = position + 1 - self.rows.len();
        while self.rows.len() <= position {
            let (index, start, end) = match self.rows.last() {
                Some(last) => (last.index + 1, last.start, last.end),
                None => (1, Timestamp::ZERO, Timestamp::ZERO),
            };
            self.rows.push(SubtitleLine {
                index,
                start,
                end,
                good_text: None,
                bad_text: None,
            });
        }
        debug!("Appended {} placeholder rows, table now has {}", added, self.rows.len());
    }

    /// Locate the rows a copy into `column` must shift and grow the table to hold them
    pub fn find_copy_destination(&mut self, selection: &Selection, column: Column) -> Result<ShiftPlan, TableError> {
        self.check_selection(selection)?;

        let insertion_point = self.rows[selection.first()..]
            .iter()
            .position(|row| row.text(column).is_none())
            .map(|offset| selection.first() + offset)
            .unwrap_or(self.rows.len());

        let plan = ShiftPlan {
            first: selection.first(),
            insertion_point,
            offset: selection.len(),
        };
        self.ensure_rows_through(plan.to_position());

        Ok(plan)
    }

    /// Push the selected good-column rows (and their timing) down and vacate the selection
    ///
    /// Vacated rows take the timing of the first selected row and an empty good text.
    pub fn copy_to_good(&mut self, selection: &Selection) -> Result<ShiftPlan, TableError> {
        let plan = self.find_copy_destination(selection, Column::Good)?;

        for from in (plan.first..plan.insertion_point).rev() {
            let source = &self.rows[from];
            let (start, end, text) = (source.start, source.end, source.good_text.clone());
            let target = &mut self.rows[from + plan.offset];
            target.start = start;
            target.end = end;
            target.good_text = text;
        }

        let (start, end) = (self.rows[plan.first].start, self.rows[plan.first].end);
        for position in selection.positions() {
            let row = &mut self.rows[position];
            row.start = start;
            row.end = end;
            row.good_text = Some(String::new());
        }

        debug!("Copied rows {:?} to good column ({:?})", selection.positions(), plan);
        Ok(plan)
    }

    /// Push the selected bad-column rows down and fill the selection with the good text
    ///
    /// Timing is left alone.
    pub fn copy_to_bad(&mut self, selection: &Selection) -> Result<ShiftPlan, TableError> {
        let plan = self.find_copy_destination(selection, Column::Bad)?;

        for from in (plan.first..plan.insertion_point).rev() {
            let text = self.rows[from].bad_text.clone();
            self.rows[from + plan.offset].bad_text = text;
        }

        for position in selection.positions() {
            let row = &mut self.rows[position];
            row.bad_text = row.good_text.clone();
        }

        debug!("Copied rows {:?} to bad column ({:?})", selection.positions(), plan);
        Ok(plan)
    }

    /// Join the selected bad texts into the first selected row and pull later rows up
    ///
    /// Rows with no bad text contribute an empty line. Rows whose source lies
    /// past the end of the table become empty. Row count, timing and the good
    /// column are untouched.
    pub fn merge(&mut self, selection: &Selection) -> Result<(), TableError> {
        self.check_selection(selection)?;

        let merged = selection
            .positions()
            .map(|position| self.rows[position].bad_text.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n");
        self.rows[selection.first()].bad_text = Some(merged);

        let shift = selection.len() - 1;
        for position in selection.first() + 1..self.rows.len() {
            let text = self.rows.get(position + shift).and_then(|row| row.bad_text.clone());
            self.rows[position].bad_text = text;
        }

        debug!("Merged rows {:?} in bad column", selection.positions());
        Ok(())
    }
}
