use tracing::{error, info};

use crate::input::columns::missing_columns;
use crate::input::read_catalogue;
use crate::model::table::Table;
use crate::pipeline::Diagnostic;

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub table: Table,
    pub missing_columns: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Stage1Output {
    pub fn accepted(&self) -> bool {
        self.missing_columns.is_empty()
    }
}

/// Parses the upload and checks required columns.
///
/// A parse failure is reported and replaced by an empty table, which then
/// fails the column check with every required column missing.
pub fn run_stage1(bytes: &[u8]) -> Stage1Output {
    let mut diagnostics = Vec::new();

    let table = match read_catalogue(bytes) {
        Ok(table) => {
            info!(
                "CSV Uploaded Successfully ({} rows, {} columns)",
                table.n_rows(),
                table.columns.len()
            );
            diagnostics.push(Diagnostic::Info("CSV Uploaded Successfully".to_string()));
            table
        }
        Err(e) => {
            error!("Error reading file: {e}");
            diagnostics.push(Diagnostic::Error(format!("Error reading file: {e}")));
            Table::empty()
        }
    };

    let missing = missing_columns(&table);
    if !missing.is_empty() {
        let msg = format!("Missing columns: {}", missing.join(", "));
        error!("{msg}");
        diagnostics.push(Diagnostic::Error(msg));
    }

    Stage1Output {
        table,
        missing_columns: missing,
        diagnostics,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;
