use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::model::diagnostics::Diagnostic;
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::stage2_score::Stage2Output;
use crate::report::chart::{render_metrics_chart, render_processing_chart};
use crate::report::export::{download_link, results_csv};
use crate::report::html::{PREVIEW_ROWS, PageView, ReportView, render_page};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{ReportError, SummaryData, falling_short, metric_means, timing_stats};

#[derive(Debug, Clone)]
pub struct Stage3Input<'a> {
    pub scored: &'a Stage2Output,
    pub thresholds: &'a ThresholdProfile,
    pub scorer: String,
    pub tool_name: String,
    pub tool_version: String,
}

#[derive(Debug, Clone)]
pub struct Stage3Output {
    pub summary: SummaryData,
    pub results_csv: Vec<u8>,
    pub falling_short_csv: Vec<u8>,
    pub view: ReportView,
}

pub fn run_stage3(input: &Stage3Input<'_>) -> Result<Stage3Output, ReportError> {
    let scored = input.scored;
    let threshold = input.thresholds.falling_short_below;

    let means = metric_means(&scored.metrics);
    let seconds = scored.processing_seconds();
    let short_rows = falling_short(&scored.metrics, threshold);
    let short_table = scored.results.select_rows(&short_rows);

    let csv = results_csv(&scored.results)?;
    let short_csv = short_table.to_csv()?;

    let summary = SummaryData {
        tool_name: input.tool_name.clone(),
        tool_version: input.tool_version.clone(),
        scorer: input.scorer.clone(),
        threshold_profile: input.thresholds.label.clone(),
        threshold,
        n_input_rows: scored.n_input_rows,
        n_scored_rows: scored.timings.len(),
        n_result_rows: scored.results.n_rows(),
        n_failed_rows: scored.failures.len(),
        means,
        falling_short_rows: short_rows.len(),
        processing_time: timing_stats(&seconds),
        failures: scored.failures.clone(),
    };

    let view = ReportView {
        preview: scored.results.head(PREVIEW_ROWS),
        metrics_svg: render_metrics_chart(means.as_ref())?,
        timings_svg: render_processing_chart(&seconds)?,
        falling_short: short_table,
        threshold,
        download_link: download_link(&csv),
    };

    Ok(Stage3Output {
        summary,
        results_csv: csv,
        falling_short_csv: short_csv,
        view,
    })
}

pub fn write_reports(
    report: &Stage3Output,
    diagnostics: &[Diagnostic],
    out_dir: &Path,
) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;

    write_bytes(&out_dir.join("results.csv"), &report.results_csv)?;
    write_bytes(&out_dir.join("falling_short.csv"), &report.falling_short_csv)?;

    let json = render_summary_json(&report.summary, diagnostics)?;
    write_bytes(&out_dir.join("summary.json"), json.as_bytes())?;

    let text = render_report_text(&report.summary);
    write_bytes(&out_dir.join("report.txt"), text.as_bytes())?;

    let page = render_page(&PageView {
        diagnostics,
        upload_action: None,
        report: Some(&report.view),
    });
    write_bytes(&out_dir.join("report.html"), page.as_bytes())?;

    info!("reports written to {}", out_dir.display());
    Ok(())
}

fn write_bytes(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents)?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_report.rs"]
mod tests;
