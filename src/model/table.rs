use std::io;

use csv::{ReaderBuilder, Terminator, WriterBuilder};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Parses CSV text whose first record is the header.
    ///
    /// Short records are padded with empty cells. A record with more fields
    /// than the header is an error.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, csv::Error> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);
        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let mut table = Table::new(columns);
        for record in reader.records() {
            let record = record?;
            if record.len() > table.columns.len() {
                let line = record.position().map_or(0, |p| p.line());
                return Err(csv::Error::from(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Error tokenizing data. Expected {} fields in line {}, saw {}",
                        table.columns.len(),
                        line,
                        record.len()
                    ),
                )));
            }
            table.push_row(record.iter().map(str::to_string).collect());
        }
        Ok(table)
    }

    pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        if !self.columns.is_empty() {
            writer.write_record(&self.columns)?;
            for row in &self.rows {
                writer.write_record(row)?;
            }
        }
        writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn row_table(&self, row: usize) -> Table {
        self.select_rows(&[row])
    }

    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    pub fn select_rows(&self, rows: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: rows
                .iter()
                .filter_map(|&r| self.rows.get(r).cloned())
                .collect(),
        }
    }

    /// Appends `other` below `self`.
    ///
    /// Columns are the union of both tables in order of first appearance;
    /// cells a row has no value for are left empty. Repeated column names are
    /// matched by occurrence, so the second `X` of `other` lands in the second
    /// `X` of `self`.
    pub fn append(&mut self, other: &Table) {
        let mut mapping = Vec::with_capacity(other.columns.len());
        let mut claimed = vec![false; self.columns.len()];
        for name in &other.columns {
            let existing = self
                .columns
                .iter()
                .enumerate()
                .find(|(i, c)| *c == name && !claimed[*i])
                .map(|(i, _)| i);
            let target = match existing {
                Some(i) => i,
                None => {
                    self.columns.push(name.clone());
                    claimed.push(false);
                    for row in &mut self.rows {
                        row.push(String::new());
                    }
                    self.columns.len() - 1
                }
            };
            claimed[target] = true;
            mapping.push(target);
        }

        for src in &other.rows {
            let mut row = vec![String::new(); self.columns.len()];
            for (cell, &target) in src.iter().zip(&mapping) {
                row[target] = cell.clone();
            }
            self.rows.push(row);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/table.rs"]
mod tests;
