//! In-memory raw tables: arbitrary column names, optional text cells.

use std::io::{Read, Write};
use std::path::Path;

use chrono::Timelike;
use mediadash_core::{CanonicalField, Dataset, Record};

use crate::error::PipelineError;

/// Cell values the CSV reader treats as missing, in addition to empty cells.
///
/// Matched exactly (no trimming, case-sensitive), the same set common
/// dataframe CSV readers use by default.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A table of optional text cells under arbitrary column names.
///
/// Rows always have exactly one cell per column: short rows are padded with
/// missing cells and surplus cells are dropped at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Reads a headed CSV document. Ragged rows are accepted.
    ///
    /// Empty cells and [`NA_TOKENS`] become missing cells.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Csv`] if the input is not valid CSV or not UTF-8.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, PipelineError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let columns: Vec<String> = rdr
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(parse_cell).collect());
        }

        tracing::debug!(
            columns = columns.len(),
            rows = rows.len(),
            "read raw CSV table"
        );

        Ok(Self::new(columns, rows))
    }

    /// Opens and reads a CSV file. See [`RawTable::from_csv_reader`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] if the file cannot be opened, or
    /// [`PipelineError::Csv`] if it cannot be parsed.
    pub fn from_csv_path(path: &Path) -> Result<Self, PipelineError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }

    /// Renders a cleaned dataset back into raw form with the six canonical
    /// columns. Midnight timestamps are written as bare dates.
    ///
    /// Cleaning the result reproduces `dataset` exactly.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let columns = CanonicalField::ALL
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        let rows = dataset.iter().map(record_cells).collect();
        Self { columns, rows }
    }

    /// Writes the table as CSV with a header row. Missing cells are empty.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Csv`] if writing fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), PipelineError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        wtr.flush()?;
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (`row`, `column`), or `None` if missing or out of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column)?.as_deref()
    }

    /// Returns a copy with the columns at the given indices renamed.
    #[must_use]
    pub fn with_renamed(&self, renames: &[(usize, &str)]) -> Self {
        let mut columns = self.columns.clone();
        for &(idx, name) in renames {
            if let Some(col) = columns.get_mut(idx) {
                *col = name.to_string();
            }
        }
        Self {
            columns,
            rows: self.rows.clone(),
        }
    }
}

fn parse_cell(raw: &str) -> Option<String> {
    if raw.is_empty() || NA_TOKENS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

fn record_cells(record: &Record) -> Vec<Option<String>> {
    let date = if record.date.time().num_seconds_from_midnight() == 0
        && record.date.time().nanosecond() == 0
    {
        record.date.format("%Y-%m-%d").to_string()
    } else {
        record.date.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    };
    vec![
        Some(date),
        Some(record.platform.clone()),
        Some(record.sentiment.to_string()),
        Some(record.location.clone()),
        Some(record.engagements.to_string()),
        Some(record.media_type.clone()),
    ]
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
