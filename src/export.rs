//! Tabular output
//!
//! Every crawl path ends in a list of [`LabeledTable`]s. They are handed to a
//! downstream consumer as-is, or written as CSV/JSON files once the user
//! confirms on stdin.

use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// A named, numbered table of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledTable {
    /// Sequence number used in file names
    pub number: usize,
    /// Short identifier (`drops`, `wikitable_3`, ...)
    pub label: String,
    /// Column headers
    pub columns: Vec<String>,
    /// Rows, each as wide as `columns`
    pub rows: Vec<Vec<String>>,
}

impl LabeledTable {
    /// Create a table
    pub fn new<S: Into<String>>(
        number: usize,
        label: S,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            number,
            label: label.into(),
            columns,
            rows,
        }
    }

    /// Same table under another sequence number
    pub fn renumbered(mut self, number: usize) -> Self {
        self.number = number;
        self
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// No data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One CSV file per table
    #[default]
    Csv,
    /// One JSON file holding every table
    Json,
}

/// `{prefix}_table_{number}.csv`
pub fn csv_file_name(prefix: &str, number: usize) -> String {
    format!("{prefix}_table_{number}.csv")
}

/// Write a table as CSV (header row first)
pub fn write_csv<W: Write>(writer: W, table: &LabeledTable) -> Result<()> {
    let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    csv.write_record(&table.columns)?;
    for row in &table.rows {
        csv.write_record(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes labeled tables into a directory
#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
    prefix: String,
    format: ExportFormat,
}

impl Exporter {
    /// Create an exporter
    pub fn new<P: AsRef<Path>, S: Into<String>>(
        out_dir: P,
        prefix: S,
        format: ExportFormat,
    ) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
            prefix: prefix.into(),
            format,
        }
    }

    /// Write all non-empty tables; returns the files written
    pub fn write_all(&self, tables: &[LabeledTable]) -> Result<Vec<PathBuf>> {
        let tables: Vec<&LabeledTable> = tables.iter().filter(|t| !t.is_empty()).collect();
        if tables.is_empty() {
            return Err(ExportError::NothingToExport.into());
        }
        std::fs::create_dir_all(&self.out_dir)?;

        match self.format {
            ExportFormat::Csv => tables.iter().map(|t| self.write_csv_file(t)).collect(),
            ExportFormat::Json => Ok(vec![self.write_json_file(&tables)?]),
        }
    }

    fn write_csv_file(&self, table: &LabeledTable) -> Result<PathBuf> {
        let path = self.out_dir.join(csv_file_name(&self.prefix, table.number));
        let file = std::fs::File::create(&path).map_err(|e| ExportError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        write_csv(std::io::BufWriter::new(file), table)?;
        info!("Saved table {} ({}) to {}", table.number, table.label, path.display());
        Ok(path)
    }

    fn write_json_file(&self, tables: &[&LabeledTable]) -> Result<PathBuf> {
        let path = self.out_dir.join(format!("{}.json", self.prefix));
        let file = std::fs::File::create(&path).map_err(|e| ExportError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), tables)?;
        info!("Saved {} tables to {}", tables.len(), path.display());
        Ok(path)
    }
}

/// Ask a yes/no question. Only `y` (any case, surrounding whitespace ignored)
/// counts as yes; end of input counts as no.
pub fn confirm<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    question: &str,
) -> std::io::Result<bool> {
    write!(output, "{question} (y/n): ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
