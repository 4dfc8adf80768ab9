pub mod stage1_validate;
pub mod stage2_score;
pub mod stage3_report;

pub use crate::model::diagnostics::Diagnostic;

use crate::model::thresholds::ThresholdProfile;
use crate::report::ReportError;
use crate::scorer::Scorer;
use stage1_validate::run_stage1;
use stage2_score::{Stage2Output, run_stage2};
use stage3_report::{Stage3Input, Stage3Output, run_stage3};

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub missing_columns: Vec<String>,
    pub scored: Option<Stage2Output>,
    pub report: Option<Stage3Output>,
}

impl RunOutcome {
    pub fn accepted(&self) -> bool {
        self.report.is_some()
    }
}

pub fn score_upload<S: Scorer + ?Sized>(
    bytes: &[u8],
    scorer: &mut S,
    thresholds: &ThresholdProfile,
) -> Result<RunOutcome, ReportError> {
    let stage1 = run_stage1(bytes);
    let mut diagnostics = stage1.diagnostics.clone();
    if !stage1.accepted() {
        return Ok(RunOutcome {
            diagnostics,
            missing_columns: stage1.missing_columns,
            scored: None,
            report: None,
        });
    }

    let scorer_name = scorer.describe();
    let stage2 = run_stage2(&stage1.table, scorer);
    for f in &stage2.failures {
        diagnostics.push(Diagnostic::Error(format!(
            "Error processing row {}: {}",
            f.row, f.message
        )));
    }

    let stage3 = run_stage3(&Stage3Input {
        scored: &stage2,
        thresholds,
        scorer: scorer_name,
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    })?;

    Ok(RunOutcome {
        diagnostics,
        missing_columns: Vec::new(),
        scored: Some(stage2),
        report: Some(stage3),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
