use crate::model::metrics::metric_order;
use crate::report::{SummaryData, format_f64_3};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Catalogue Quality Report\n");
    out.push_str("========================\n\n");

    out.push_str("1. Run\n");
    out.push_str(&format!(
        "Tool: {} {}\n",
        data.tool_name, data.tool_version
    ));
    out.push_str(&format!("Scorer: {}\n", data.scorer));
    out.push_str(&format!(
        "Threshold: {} ({})\n\n",
        format_f64_3(data.threshold),
        data.threshold_profile
    ));

    out.push_str("2. Rows\n");
    out.push_str(&format!("Input rows: {}\n", data.n_input_rows));
    out.push_str(&format!("Scored rows: {}\n", data.n_scored_rows));
    out.push_str(&format!("Result rows: {}\n", data.n_result_rows));
    out.push_str(&format!("Failed rows: {}\n\n", data.n_failed_rows));

    out.push_str("3. Overall metrics\n");
    match &data.means {
        Some(means) => {
            for &m in metric_order() {
                out.push_str(&format!(
                    "{} mean: {}\n",
                    m.name(),
                    format_f64_3(means.get(m))
                ));
            }
        }
        None => out.push_str("No rows were scored.\n"),
    }
    out.push_str(&format!(
        "Falling short: {} of {} result rows\n\n",
        data.falling_short_rows, data.n_result_rows
    ));

    out.push_str("4. Processing time\n");
    out.push_str(&format!(
        "Total: {} s\n",
        format_f64_3(data.processing_time.total_s)
    ));
    if let (Some(mean), Some(max)) = (data.processing_time.mean_s, data.processing_time.max_s) {
        out.push_str(&format!(
            "Per row: mean {} s, max {} s\n",
            format_f64_3(mean),
            format_f64_3(max)
        ));
    }

    if !data.failures.is_empty() {
        out.push_str("\n5. Failures\n");
        for f in &data.failures {
            out.push_str(&format!("Error processing row {}: {}\n", f.row, f.message));
        }
    }

    out
}
