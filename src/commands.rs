/*!
 * Command grammar of the interactive shell.
 *
 * Rows are addressed by 1-based row number as printed by `show`; a range is
 * either `N` or `N-M`.
 */

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

use crate::alignment::{Column, Selection};

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open { column: Column, path: PathBuf },
    Show { from: Option<usize>, to: Option<usize> },
    CopyToGood(Selection),
    CopyToBad(Selection),
    Merge(Selection),
    Save,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  open good|bad <path>    load a subtitle file into a column
  show [N[-M]]            print rows (1-based row numbers)
  copy-good <N[-M]>, <-   shift the good column down and vacate the rows
  copy-bad <N[-M]>, ->    shift the bad column down and fill the rows with good text
  merge <N[-M]>           join bad-column rows into the first one
  save                    write every changed file (a backup is made first)
  status                  show open files and unsaved changes
  help                    show this message
  quit, exit              leave the shell";

/// Parse `N` or `N-M` (1-based, inclusive) into a selection of 0-based positions
pub fn parse_selection(spec: &str) -> Result<Selection> {
    let (first, last) = parse_row_range(spec)?;
    Ok(Selection::range(first, last)?)
}

fn parse_row_number(s: &str) -> Result<usize> {
    let number: usize = s.trim().parse()
        .with_context(|| format!("Invalid row number: {}", s.trim()))?;
    if number == 0 {
        return Err(anyhow!("Row numbers start at 1"));
    }
    Ok(number - 1)
}

fn parse_row_range(spec: &str) -> Result<(usize, usize)> {
    match spec.split_once('-') {
        Some((first, last)) => Ok((parse_row_number(first)?, parse_row_number(last)?)),
        None => {
            let row = parse_row_number(spec)?;
            Ok((row, row))
        }
    }
}

fn required<'a>(arg: Option<&'a str>, usage: &str) -> Result<&'a str> {
    arg.filter(|a| !a.is_empty()).ok_or_else(|| anyhow!("Usage: {}", usage))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let rest = if rest.is_empty() { None } else { Some(rest) };

        match name.to_lowercase().as_str() {
            "open" => {
                let args = required(rest, "open good|bad <path>")?;
                let (column, path) = args.split_once(char::is_whitespace)
                    .ok_or_else(|| anyhow!("Usage: open good|bad <path>"))?;
                Ok(Command::Open {
                    column: column.parse()?,
                    path: PathBuf::from(path.trim()),
                })
            }
            "show" => match rest {
                None => Ok(Command::Show { from: None, to: None }),
                Some(range) => {
                    let (from, to) = parse_row_range(range)?;
                    Ok(Command::Show { from: Some(from), to: Some(to) })
                }
            },
            "copy-good" | "<-" | "<--" => Ok(Command::CopyToGood(parse_selection(required(rest, "copy-good <N[-M]>")?)?)),
            "copy-bad" | "->" | "-->" => Ok(Command::CopyToBad(parse_selection(required(rest, "copy-bad <N[-M]>")?)?)),
            "merge" => Ok(Command::Merge(parse_selection(required(rest, "merge <N[-M]>")?)?)),
            "save" => Ok(Command::Save),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err(anyhow!("Empty command")),
            other => Err(anyhow!("Unknown command: {} (type 'help')", other)),
        }
    }
}
