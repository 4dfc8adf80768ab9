use std::fmt::Write;

use crate::model::diagnostics::Diagnostic;
use crate::model::table::Table;
use crate::report::format_f64_3;

pub const PAGE_TITLE: &str = "Score Your Catalogue:";
pub const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone)]
pub struct ReportView {
    pub preview: Table,
    pub metrics_svg: String,
    pub timings_svg: String,
    pub falling_short: Table,
    pub threshold: f64,
    pub download_link: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PageView<'a> {
    pub diagnostics: &'a [Diagnostic],
    /// Form target; `None` renders a static report without the upload widget.
    pub upload_action: Option<&'a str>,
    pub report: Option<&'a ReportView>,
}

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;margin:2rem auto;max-width:1040px;color:#222}\
.msg{padding:.5rem .75rem;border-radius:4px;margin:.4rem 0}\
.info{background:#eef6ee}.error{background:#fbeaea;color:#8a1f1f}\
.columns{display:flex;gap:1.5rem;flex-wrap:wrap}.columns>section{flex:1 1 480px}\
table{border-collapse:collapse;font-size:.85rem;margin:.5rem 0;display:block;overflow-x:auto}\
th,td{border:1px solid #ddd;padding:.25rem .5rem;text-align:left;white-space:nowrap}\
th{background:#f4f4f4}";

pub fn render_page(view: &PageView<'_>) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(PAGE_TITLE));
    let _ = writeln!(out, "<style>{STYLE}</style>");
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape(PAGE_TITLE));

    if let Some(action) = view.upload_action {
        let _ = writeln!(
            out,
            "<form method=\"post\" action=\"{}\" enctype=\"multipart/form-data\">\n\
             <label>Choose a CSV file <input type=\"file\" name=\"file\" accept=\".csv,text/csv\" required></label>\n\
             <button type=\"submit\">Score</button>\n</form>",
            escape(action)
        );
    }

    for d in view.diagnostics {
        let class = if d.is_error() { "error" } else { "info" };
        let _ = writeln!(
            out,
            "<div class=\"msg {class}\">{}</div>",
            escape(d.message())
        );
    }

    if let Some(report) = view.report {
        render_report(&mut out, report);
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_report(out: &mut String, report: &ReportView) {
    out.push_str("<h2>Results preview</h2>\n");
    out.push_str(&render_table(&report.preview));

    out.push_str("<div class=\"columns\">\n");
    out.push_str("<section>\n<h2>Overall Metrics</h2>\n");
    out.push_str(&report.metrics_svg);
    out.push_str("</section>\n<section>\n<h2>Processing Times</h2>\n");
    out.push_str(&report.timings_svg);
    out.push_str("</section>\n</div>\n");

    if !report.falling_short.is_empty() {
        let _ = writeln!(
            out,
            "<h2>Instances where metrics fall short:</h2>\n<p>Rows with any metric below {}.</p>",
            format_f64_3(report.threshold)
        );
        out.push_str(&render_table(&report.falling_short));
    }

    let _ = writeln!(out, "<p>{}</p>", report.download_link);
}

pub fn render_table(table: &Table) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for c in &table.columns {
        let _ = write!(out, "<th>{}</th>", escape(c));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/html.rs"]
mod tests;
