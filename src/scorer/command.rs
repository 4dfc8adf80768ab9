use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::model::table::Table;
use crate::scorer::{ScoreError, Scorer};

/// Runs an external program once per row.
///
/// The one-row table goes to stdin as CSV (header + row); stdout must be a CSV
/// table with a header. A non-zero exit status is a failure. No timeout is
/// applied, so a hung scorer blocks the run.
#[derive(Debug, Clone)]
pub struct CommandScorer {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandScorer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Scorer for CommandScorer {
    fn score(&mut self, row: &Table) -> Result<Table, ScoreError> {
        let payload = row.to_csv()?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ScoreError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ScoreError::Other("scorer stdin unavailable".to_string()))?;
        // Feed stdin from another thread so a chatty scorer cannot fill its
        // stdout pipe while we are still writing.
        let writer = std::thread::spawn(move || stdin.write_all(&payload));

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("scorer closed stdin before reading the whole row");
            }
            Ok(Err(e)) => return Err(ScoreError::Io(e)),
            Err(_) => return Err(ScoreError::Other("stdin writer panicked".to_string())),
        }

        if !output.status.success() {
            return Err(ScoreError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let table = Table::from_csv(&output.stdout).map_err(|e| ScoreError::Output(e.to_string()))?;
        if table.columns.is_empty() {
            return Err(ScoreError::Output("empty response".to_string()));
        }
        Ok(table)
    }

    fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/scorer/command.rs"]
mod tests;
