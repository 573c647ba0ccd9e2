use anyhow::{Context, Result};
use log::{error, info, warn};
use std::io::{BufRead, Write};
use std::path::Path;

use crate::alignment::{AlignmentTable, Column};
use crate::app_config::Config;
use crate::commands::{Command, HELP};
use crate::session::Session;

// @module: Application controller driving a session from shell commands

/// What the shell should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main application controller for subtitle alignment
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Editing session
    session: Session,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let session = Session::with_backup_suffix(&config.backup.suffix);
        Ok(Self { config, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Open the initial files given on the command line
    ///
    /// A file that cannot be opened is reported and skipped.
    pub fn open_initial(&mut self, good: Option<&Path>, bad: Option<&Path>) {
        for (column, path) in [(Column::Good, good), (Column::Bad, bad)] {
            if let Some(path) = path {
                if let Err(e) = self.session.open(column, path) {
                    error!("Could not open {} file {}: {}", column, path.display(), e);
                }
            }
        }
    }

    /// Run one command, writing any user-facing output to `out`
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Open { column, path } => {
                self.session.open(column, &path)?;
                writeln!(out, "{} file: {}", column, path.display())?;
            }
            Command::Show { from, to } => {
                let from = from.unwrap_or(0);
                let to = to.unwrap_or(from + self.config.display.page_size - 1);
                let rendered = render_rows(self.session.table(), from, to, self.config.display.text_width);
                write!(out, "{}", rendered)?;
            }
            Command::CopyToGood(selection) => {
                self.session.copy_to_good(&selection)?;
            }
            Command::CopyToBad(selection) => {
                self.session.copy_to_bad(&selection)?;
            }
            Command::Merge(selection) => {
                self.session.merge(&selection)?;
            }
            Command::Save => {
                let saved = self.session.save()?;
                if saved.is_empty() {
                    writeln!(out, "Nothing to save")?;
                }
                for path in saved {
                    writeln!(out, "File {} saved successfully", path.display())?;
                }
            }
            Command::Status => {
                for column in [Column::Good, Column::Bad] {
                    let document = self.session.document(column);
                    let path = document.path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "None".to_string());
                    let marker = if document.is_dirty() { " (modified)" } else { "" };
                    writeln!(out, "{} file: {}{}", column, path, marker)?;
                }
                writeln!(out, "rows: {}", self.session.table().len())?;
            }
            Command::Help => {
                writeln!(out, "{}", HELP)?;
            }
            Command::Quit => {
                if self.session.has_unsaved_changes() {
                    warn!("Quitting with unsaved changes");
                }
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    /// Read commands line by line until `quit` or end of input
    ///
    /// A failing command is reported and the loop carries on.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, interactive: bool) -> Result<()> {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            let line = line.trim();

            if !line.is_empty() && !line.starts_with('#') {
                let result = line.parse::<Command>()
                    .and_then(|command| self.execute(command, out));
                match result {
                    Ok(Flow::Quit) => return Ok(()),
                    Ok(Flow::Continue) => {}
                    Err(e) => {
                        error!("{:#}", e);
                        writeln!(out, "Error: {:#}", e)?;
                    }
                }
            }

            if interactive {
                write!(out, "> ")?;
                out.flush()?;
            }
        }

        if self.session.has_unsaved_changes() {
            warn!("Input ended with unsaved changes");
        }
        info!("Session finished");
        Ok(())
    }
}

fn cell(text: Option<&str>, width: usize) -> String {
    match text {
        None => "-".to_string(),
        Some(text) => {
            let flat = text.replace('\n', " / ");
            if flat.chars().count() > width {
                let truncated: String = flat.chars().take(width - 3).collect();
                format!("{}...", truncated)
            } else {
                flat
            }
        }
    }
}

/// Render rows `from..=to` as a fixed-width listing of row, index, start, end, good and bad
pub fn render_rows(table: &AlignmentTable, from: usize, to: usize, text_width: usize) -> String {
    let mut out = format!(
        "{:>5}  {:>5}  {:<12}  {:<12}  {:<w$}  {}\n",
        "row", "index", "start", "end", "good", "bad", w = text_width
    );

    let last = to.min(table.len().saturating_sub(1));
    if table.is_empty() || from > last {
        return out;
    }

    for (position, row) in table.rows()[from..=last].iter().enumerate() {
        out.push_str(&format!(
            "{:>5}  {:>5}  {:<12}  {:<12}  {:<w$}  {}\n",
            from + position + 1,
            row.index,
            row.start.to_string(),
            row.end.to_string(),
            cell(row.good_text.as_deref(), text_width),
            cell(row.bad_text.as_deref(), text_width),
            w = text_width
        ));
    }
    out
}
