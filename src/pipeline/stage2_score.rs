use std::time::Instant;

use tracing::{error, info};

use crate::model::metrics::{MetricScores, parse_metric_rows};
use crate::model::scores::{RowFailure, RowTiming};
use crate::model::table::Table;
use crate::scorer::{ScoreError, Scorer};

#[derive(Debug, Clone, Default)]
pub struct Stage2Output {
    pub n_input_rows: usize,
    pub results: Table,
    pub metrics: Vec<MetricScores>,
    pub timings: Vec<RowTiming>,
    pub failures: Vec<RowFailure>,
}

impl Stage2Output {
    pub fn processing_seconds(&self) -> Vec<f64> {
        self.timings.iter().map(|t| t.seconds).collect()
    }
}

/// Scores each row of `table` on its own, in order.
///
/// A failing row is logged, recorded in `failures` and skipped; the run
/// carries on with the next row. There is no retry.
pub fn run_stage2<S: Scorer + ?Sized>(table: &Table, scorer: &mut S) -> Stage2Output {
    let n_rows = table.n_rows();
    let mut out = Stage2Output {
        n_input_rows: n_rows,
        ..Stage2Output::default()
    };

    info!("scoring {} rows with {}", n_rows, scorer.describe());

    for row in 0..n_rows {
        let single = table.row_table(row);
        let start = Instant::now();

        match score_one(scorer, &single) {
            Ok((scored, metrics)) => {
                out.results.append(&scored);
                out.metrics.extend(metrics);
                out.timings.push(RowTiming {
                    source_row: row,
                    seconds: start.elapsed().as_secs_f64(),
                });
            }
            Err(e) => {
                error!("Error processing row {row}: {e}");
                out.failures.push(RowFailure {
                    row,
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        "scored {} of {} rows ({} failed)",
        out.timings.len(),
        n_rows,
        out.failures.len()
    );
    out
}

fn score_one<S: Scorer + ?Sized>(
    scorer: &mut S,
    single: &Table,
) -> Result<(Table, Vec<MetricScores>), ScoreError> {
    let scored = scorer.score(single)?;
    if scored.is_empty() {
        return Err(ScoreError::Output("scorer returned no rows".to_string()));
    }
    let metrics = parse_metric_rows(&scored)?;
    Ok((scored, metrics))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;
