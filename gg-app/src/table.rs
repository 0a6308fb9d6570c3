use gg_lib::RepoEntry;
use log::warn;
use std::io::{Result, Write};
use tabled::builder::Builder;
use tabled::settings::{Padding, Style};

/// Spaces between the end of the widest name and the description column.
const COLUMN_GAP: usize = 4;

/// Lays out name/description rows with the descriptions aligned.
///
/// Only the name column goes through the layout; descriptions are appended
/// as given. A row with no description is just its name.
pub fn format_table(rows: &[RepoEntry]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut builder = Builder::default();
    for row in rows {
        builder.push_record([row.name.clone()]);
    }

    let mut table = builder.build();
    table
        .with(Style::empty())
        .with(Padding::new(0, COLUMN_GAP, 0, 0));

    table
        .to_string()
        .lines()
        .zip(rows)
        .map(|(padded_name, row)| {
            if row.description.is_empty() {
                row.name.clone()
            } else {
                format!("{}{}", padded_name, row.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collects rows and writes them as one aligned block.
///
/// Rows are written by [`TableWriter::finish`], or when the writer is
/// dropped on an error path, so output gathered before a failure is never
/// lost.
pub struct TableWriter<W: Write> {
    out: W,
    rows: Vec<RepoEntry>,
}

impl<W: Write> TableWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: RepoEntry) {
        self.rows.push(row);
    }

    pub fn finish(mut self) -> Result<()> {
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        if !self.rows.is_empty() {
            let text = format_table(&self.rows);
            self.rows.clear();
            writeln!(self.out, "{}", text)?;
        }
        self.out.flush()
    }
}

impl<W: Write> Drop for TableWriter<W> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!("failed to write output: {}", e);
        }
    }
}
