use serde::Serialize;

use crate::model::diagnostics::Diagnostic;
use crate::report::SummaryData;

#[derive(Serialize)]
struct SummaryDocument<'a> {
    tool: &'a str,
    #[serde(flatten)]
    summary: &'a SummaryData,
    diagnostics: &'a [Diagnostic],
}

pub fn render_summary_json(
    data: &SummaryData,
    diagnostics: &[Diagnostic],
) -> Result<String, serde_json::Error> {
    let doc = SummaryDocument {
        tool: "catalogue-qc",
        summary: data,
        diagnostics,
    };
    let mut out = serde_json::to_string_pretty(&doc)?;
    out.push('\n');
    Ok(out)
}
