pub mod command;

use thiserror::Error;

use crate::model::metrics::MetricError;
use crate::model::table::Table;

pub use command::CommandScorer;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to start scorer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("scorer I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("scorer exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("scorer output is not a CSV table: {0}")]
    Output(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Metric(#[from] MetricError),
    #[error("{0}")]
    Other(String),
}

pub trait Scorer {
    fn score(&mut self, row: &Table) -> Result<Table, ScoreError>;

    fn describe(&self) -> String {
        "in-process scorer".to_string()
    }
}

impl<F> Scorer for F
where
    F: FnMut(&Table) -> Result<Table, ScoreError>,
{
    fn score(&mut self, row: &Table) -> Result<Table, ScoreError> {
        self(row)
    }
}
